//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use url_shortcuts::api::AppState;
use url_shortcuts::config::StaticConfig;
use url_shortcuts::services::{IdentityInfo, IdentityProvider};
use url_shortcuts::storage::{NewShortcut, NewUser, SeaOrmStorage};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub async fn setup_storage() -> (TempDir, Arc<SeaOrmStorage>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");
    (dir, Arc::new(storage))
}

/// Identity provider that accepts one code and returns a fixed profile
pub struct FakeIdentity {
    pub accepted_code: String,
    pub info: IdentityInfo,
}

impl FakeIdentity {
    pub fn verified(email: &str) -> Self {
        Self {
            accepted_code: "good-code".to_string(),
            info: IdentityInfo {
                email: email.to_string(),
                name: "Tester".to_string(),
                verified_email: true,
            },
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    fn authorize_url(&self, state: &str) -> anyhow::Result<String> {
        Ok(format!("https://idp.example/auth?state={}", state))
    }

    async fn exchange(&self, code: &str) -> anyhow::Result<IdentityInfo> {
        if code == self.accepted_code {
            Ok(self.info.clone())
        } else {
            anyhow::bail!("unknown code")
        }
    }
}

pub fn test_config() -> StaticConfig {
    let mut config = StaticConfig::default();
    config.redirect.fallback_url = "https://fallback.example/".to_string();
    config.auth.homepage_url = "/dashboard".to_string();
    config
}

pub fn build_state(
    storage: Arc<SeaOrmStorage>,
    config: &StaticConfig,
    identity: Arc<dyn IdentityProvider>,
) -> Arc<AppState> {
    Arc::new(AppState::new(storage, config, TEST_JWT_SECRET, identity))
}

pub async fn add_shortcut(storage: &SeaOrmStorage, code: &str, url: &str) -> i64 {
    storage
        .insert_shortcut(&NewShortcut {
            code: code.to_string(),
            url: url.to_string(),
            created_by: 1,
        })
        .await
        .expect("Failed to insert shortcut")
}

pub async fn add_user(storage: &SeaOrmStorage, email: &str, active: bool, admin: bool) -> i64 {
    storage
        .insert_user(&NewUser {
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            active,
            admin,
        })
        .await
        .expect("Failed to insert user")
}
