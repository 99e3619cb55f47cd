//! Authenticated identity extractors
//!
//! Protected handlers take `AuthenticatedUser` or `AdminUser` as an
//! argument; extraction fails with 401 before the handler body runs.

use std::ops::Deref;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::{info, trace};

use crate::api::constants::SESSION_COOKIE_NAME;
use crate::api::state::AppState;
use crate::errors::{Result, ShortcutsError};
use crate::storage::User;

/// 从 Authorization header 提取 Bearer token
fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
}

/// Session cookie first, then the Authorization header
fn extract_session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| extract_bearer_token(req))
}

async fn authenticate(req: &HttpRequest) -> Result<User> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ShortcutsError::internal("Application state is not configured"))?;

    let token = extract_session_token(req)
        .ok_or_else(|| ShortcutsError::unauthorized("Missing session token"))?;

    let claims = state.jwt.verify(&token).inspect_err(|e| {
        info!("Session token rejected: {}", e);
    })?;

    // Account status is read fresh so deactivation takes effect immediately
    let user = state
        .users
        .find(claims.user.id)
        .await?
        .ok_or_else(|| ShortcutsError::unauthorized("Unknown user"))?;

    if !user.active {
        info!("Inactive user {} rejected", user.email);
        return Err(ShortcutsError::unauthorized("User is not active"));
    }

    trace!("Authenticated {}", user.email);
    Ok(user)
}

/// A signed-in, active user
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ShortcutsError;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { authenticate(&req).await.map(AuthenticatedUser) })
    }
}

/// A signed-in, active administrator
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl Deref for AdminUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl FromRequest for AdminUser {
    type Error = ShortcutsError;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let user = authenticate(&req).await?;
            if !user.admin {
                info!("Non-admin {} rejected from admin route", user.email);
                return Err(ShortcutsError::forbidden("Administrator access required"));
            }
            Ok(AdminUser(user))
        })
    }
}
