//! Code resolution for the public redirect route

use std::sync::Arc;

use tracing::{debug, instrument};
use url::Url;

use crate::cache::CodeCache;
use crate::errors::{Result, ShortcutsError};
use crate::storage::{SeaOrmStorage, Shortcut};
use crate::utils::query_string::{build_query_string, parse_query};

/// Where a request for a code should be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found { location: String, shortcut: Shortcut },
    Fallback { location: String },
}

impl Resolution {
    pub fn location(&self) -> &str {
        match self {
            Resolution::Found { location, .. } | Resolution::Fallback { location } => location,
        }
    }
}

pub struct RedirectResolver {
    storage: Arc<SeaOrmStorage>,
    cache: Option<Arc<CodeCache>>,
    fallback_base_url: String,
}

impl RedirectResolver {
    pub fn new(
        storage: Arc<SeaOrmStorage>,
        cache: Option<Arc<CodeCache>>,
        fallback_base_url: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            cache,
            fallback_base_url: fallback_base_url.into(),
        }
    }

    /// Code lookup through the cache when one is configured
    pub async fn lookup(&self, code: &str) -> Result<Option<Shortcut>> {
        if let Some(cache) = &self.cache
            && let Some(hit) = cache.get(code).await
        {
            debug!("Code cache hit: {}", code);
            return Ok(Some(hit));
        }

        let found = self.storage.get_shortcut_by_code(code).await?;
        if let (Some(cache), Some(shortcut)) = (&self.cache, &found) {
            cache.insert(shortcut.clone()).await;
        }
        Ok(found)
    }

    /// Decide the redirect target for `code`
    ///
    /// `request_query` is the raw inbound query string without the `?`.
    #[instrument(skip(self, request_query))]
    pub async fn resolve(&self, code: &str, request_query: &str) -> Result<Resolution> {
        match self.lookup(code).await? {
            Some(shortcut) => {
                let location = build_destination(code, &shortcut.url, request_query)?;
                debug!("Resolved '{}' to {}", code, location);
                Ok(Resolution::Found { location, shortcut })
            }
            None => {
                debug!("Unknown code '{}', using fallback", code);
                Ok(Resolution::Fallback {
                    location: format!("{}{}", self.fallback_base_url, code),
                })
            }
        }
    }
}

/// Rebuild a stored URL with the merged query string
pub fn build_destination(code: &str, stored_url: &str, request_query: &str) -> Result<String> {
    let mut url = Url::parse(stored_url).map_err(|e| {
        ShortcutsError::data_integrity(format!(
            "Stored URL for '{}' cannot be parsed: {}",
            code, e
        ))
    })?;

    let destination_params = parse_query(url.query().unwrap_or_default());
    let request_params = parse_query(request_query);
    let query = build_query_string(code, &destination_params, &request_params);
    url.set_query(Some(&query));

    Ok(url.into())
}
