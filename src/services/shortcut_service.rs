//! Shortcut management service
//!
//! Validates input, writes through the store and keeps the code cache
//! consistent with local writes.

use std::sync::Arc;

use tracing::info;

use crate::cache::CodeCache;
use crate::errors::{Result, ShortcutsError};
use crate::storage::{NewShortcut, SeaOrmStorage, Shortcut, ShortcutFilter, ShortcutUpdate};
use crate::utils::validation::{validate_code, validate_url};

/// Caller-supplied shortcut fields
#[derive(Debug, Clone)]
pub struct ShortcutInput {
    pub code: String,
    pub url: String,
}

impl ShortcutInput {
    fn validated(self) -> Result<Self> {
        let code = self.code.trim().to_string();
        validate_code(&code)?;
        let url = self.url.trim().to_string();
        validate_url(&url)?;
        Ok(Self { code, url })
    }
}

pub struct ShortcutService {
    storage: Arc<SeaOrmStorage>,
    cache: Option<Arc<CodeCache>>,
}

impl ShortcutService {
    pub fn new(storage: Arc<SeaOrmStorage>, cache: Option<Arc<CodeCache>>) -> Self {
        Self { storage, cache }
    }

    async fn invalidate(&self, code: &str) {
        if let Some(cache) = &self.cache {
            cache.invalidate(code).await;
        }
    }

    pub async fn list(&self, filter: &ShortcutFilter) -> Result<(Vec<Shortcut>, u64)> {
        self.storage.list_shortcuts(filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Shortcut> {
        self.storage
            .get_shortcut_by_id(id)
            .await?
            .ok_or_else(|| ShortcutsError::not_found(format!("Shortcut {} does not exist", id)))
    }

    pub async fn create(&self, input: ShortcutInput, user_id: i64) -> Result<i64> {
        let input = input.validated()?;
        let id = self
            .storage
            .insert_shortcut(&NewShortcut {
                code: input.code.clone(),
                url: input.url,
                created_by: user_id,
            })
            .await?;

        self.invalidate(&input.code).await;
        info!("ShortcutService: user {} created '{}'", user_id, input.code);
        Ok(id)
    }

    pub async fn update(&self, id: i64, input: ShortcutInput, user_id: i64) -> Result<i64> {
        let input = input.validated()?;
        let existing = self.get(id).await?;

        self.storage
            .update_shortcut(&ShortcutUpdate {
                id,
                code: input.code.clone(),
                url: input.url,
                updated_by: user_id,
            })
            .await?;

        self.invalidate(&existing.code).await;
        self.invalidate(&input.code).await;
        info!(
            "ShortcutService: user {} updated shortcut {} ('{}' -> '{}')",
            user_id, id, existing.code, input.code
        );
        Ok(id)
    }

    /// Deleting a missing id succeeds without touching anything
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<i64> {
        if let Some(existing) = self.storage.get_shortcut_by_id(id).await? {
            self.storage.delete_shortcut(id).await?;
            self.invalidate(&existing.code).await;
            info!(
                "ShortcutService: user {} deleted '{}' (id {})",
                user_id, existing.code, id
            );
        }
        Ok(id)
    }
}
