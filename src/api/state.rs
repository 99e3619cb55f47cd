//! Shared application state handed to every handler

use std::sync::Arc;
use std::time::Duration;

use crate::analytics::VisitRecorder;
use crate::api::jwt::JwtService;
use crate::cache::CodeCache;
use crate::config::{AuthConfig, StaticConfig};
use crate::services::{
    IdentityProvider, LeaderboardService, RedirectResolver, ShortcutService, UserService,
};
use crate::storage::SeaOrmStorage;

pub struct AppState {
    pub resolver: RedirectResolver,
    pub shortcuts: ShortcutService,
    pub users: UserService,
    pub leaderboard: LeaderboardService,
    pub recorder: VisitRecorder,
    pub jwt: JwtService,
    pub identity: Arc<dyn IdentityProvider>,
    pub auth: AuthConfig,
    pub trust_forwarded_headers: bool,
}

impl AppState {
    /// Wire every service onto one store
    ///
    /// `jwt_secret` is passed separately because startup may have generated
    /// it when the configured one is empty.
    pub fn new(
        storage: Arc<SeaOrmStorage>,
        config: &StaticConfig,
        jwt_secret: &str,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let cache = CodeCache::from_config(&config.cache).map(Arc::new);

        Self {
            resolver: RedirectResolver::new(
                storage.clone(),
                cache.clone(),
                config.redirect.fallback_url.clone(),
            ),
            shortcuts: ShortcutService::new(storage.clone(), cache),
            users: UserService::new(storage.clone()),
            leaderboard: LeaderboardService::new(storage.clone()),
            recorder: VisitRecorder::new(
                storage,
                Duration::from_millis(config.redirect.visit_timeout_ms),
            ),
            jwt: JwtService::new(jwt_secret, config.auth.session_hours),
            identity,
            auth: config.auth.clone(),
            trust_forwarded_headers: config.server.trust_forwarded_headers,
        }
    }
}
