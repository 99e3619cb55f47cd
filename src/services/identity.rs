//! External identity provider (OAuth2 authorization-code flow)
//!
//! Blocking HTTP calls go through a shared ureq agent on the blocking pool.

use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};
use ureq::Agent;
use url::Url;

use crate::config::OAuthConfig;

/// HTTP 请求超时时间
const HTTP_TIMEOUT_SECS: u64 = 10;

static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .build()
            .into()
    })
}

/// Profile returned by the provider after a successful exchange
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityInfo {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub verified_email: bool,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is sent to; `state` comes back on the callback
    fn authorize_url(&self, state: &str) -> anyhow::Result<String>;

    /// Trade an authorization code for the user's profile
    async fn exchange(&self, code: &str) -> anyhow::Result<IdentityInfo>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct OAuthIdentityProvider {
    config: OAuthConfig,
}

impl OAuthIdentityProvider {
    pub fn new(config: OAuthConfig) -> Self {
        Self { config }
    }

    fn exchange_sync(config: OAuthConfig, code: String) -> anyhow::Result<IdentityInfo> {
        let agent = get_agent();

        let token: TokenResponse = agent
            .post(&config.token_url)
            .send_form([
                ("grant_type", "authorization_code"),
                ("code", code.as_str()),
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
                ("redirect_uri", config.redirect_url.as_str()),
            ])
            .with_context(|| format!("token request to \"{}\" failed", config.token_url))?
            .into_body()
            .read_json()
            .context("token response could not be parsed")?;

        let info: IdentityInfo = agent
            .get(&config.userinfo_url)
            .header("Authorization", &format!("Bearer {}", token.access_token))
            .call()
            .with_context(|| format!("userinfo request to \"{}\" failed", config.userinfo_url))?
            .into_body()
            .read_json()
            .context("userinfo response could not be parsed")?;

        if info.email.is_empty() {
            bail!("identity provider returned no email address");
        }
        debug!("Identity provider returned {}", info.email);
        Ok(info)
    }
}

#[async_trait]
impl IdentityProvider for OAuthIdentityProvider {
    fn authorize_url(&self, state: &str) -> anyhow::Result<String> {
        let scopes = self.config.scopes.join(" ");
        let url = Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", scopes.as_str()),
                ("state", state),
                ("prompt", "select_account"),
            ],
        )
        .with_context(|| format!("invalid OAuth authorize URL \"{}\"", self.config.auth_url))?;
        Ok(url.into())
    }

    async fn exchange(&self, code: &str) -> anyhow::Result<IdentityInfo> {
        let config = self.config.clone();
        let code = code.to_string();
        tokio::task::spawn_blocking(move || Self::exchange_sync(config, code))
            .await
            .map_err(|e| {
                warn!("OAuth exchange task failed: {}", e);
                anyhow!("OAuth exchange task failed: {}", e)
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_carries_state_and_client() {
        let provider = OAuthIdentityProvider::new(OAuthConfig {
            client_id: "client-123".to_string(),
            ..OAuthConfig::default()
        });

        let url = Url::parse(&provider.authorize_url("nonce").unwrap()).unwrap();
        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(params.contains(&("state".to_string(), "nonce".to_string())));
        assert!(params.contains(&("client_id".to_string(), "client-123".to_string())));
        assert!(params.contains(&("response_type".to_string(), "code".to_string())));
        assert!(params.contains(&("scope".to_string(), "email profile".to_string())));
    }

    #[test]
    fn test_invalid_authorize_endpoint() {
        let provider = OAuthIdentityProvider::new(OAuthConfig {
            auth_url: "not a url".to_string(),
            ..OAuthConfig::default()
        });
        assert!(provider.authorize_url("nonce").is_err());
    }

    #[test]
    fn test_identity_info_defaults() {
        let info: IdentityInfo = serde_json::from_str(r#"{"email":"a@example.com"}"#).unwrap();
        assert_eq!(info.email, "a@example.com");
        assert!(!info.verified_email);
    }
}
