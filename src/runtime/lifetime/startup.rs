use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::AppState;
use crate::config::StaticConfig;
use crate::services::{IdentityProvider, OAuthIdentityProvider, UserService};
use crate::storage::{SeaOrmStorage, StorageFactory};
use crate::utils::generate_secure_token;

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub state: Arc<AppState>,
}

/// Install the process-wide TLS provider; repeated calls are harmless
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

/// Connect to the database and bring the schema up to date
pub async fn open_storage() -> Result<Arc<SeaOrmStorage>> {
    install_crypto_provider();
    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.get_backend_name());
    Ok(storage)
}

/// The configured secret, or a random one valid for this process only
pub fn resolve_jwt_secret(config: &StaticConfig) -> String {
    if config.auth.jwt_secret.is_empty() {
        warn!("auth.jwt_secret is empty, generating a random secret; sessions end on restart");
        generate_secure_token()
    } else {
        config.auth.jwt_secret.clone()
    }
}

/// Create or promote the configured initial admin
pub async fn bootstrap_admin(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Result<()> {
    let email = config.auth.bootstrap_admin_email.trim();
    if email.is_empty() {
        debug!("No bootstrap admin configured");
        return Ok(());
    }

    let admin = UserService::new(storage)
        .ensure_admin(email, &config.auth.bootstrap_admin_name)
        .await
        .with_context(|| format!("Failed to bootstrap admin {}", email))?;
    info!("Bootstrap admin ready: {} (id {})", admin.email, admin.id);
    Ok(())
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = open_storage().await?;
    bootstrap_admin(storage.clone(), config).await?;

    if config.auth.dev_login {
        warn!("Development login is enabled; GET /login signs in without a password");
    } else if config.auth.oauth.client_id.is_empty() {
        warn!("auth.oauth.client_id is empty; browser login will fail");
    }

    let identity: Arc<dyn IdentityProvider> =
        Arc::new(OAuthIdentityProvider::new(config.auth.oauth.clone()));
    let jwt_secret = resolve_jwt_secret(config);
    let state = Arc::new(AppState::new(storage.clone(), config, &jwt_secret, identity));

    debug!("Pre-startup finished in {:?}", start_time.elapsed());
    Ok(StartupContext { storage, state })
}
