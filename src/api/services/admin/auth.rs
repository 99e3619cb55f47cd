//! Login, OAuth callback and logout endpoints

use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, web};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::api::constants::AUTH_STATE_COOKIE_NAME;
use crate::api::jwt::SessionUser;
use crate::api::state::AppState;
use crate::errors::{Result, ShortcutsError};
use crate::storage::User;
use crate::utils::generate_secure_token;

use super::helpers::CookieBuilder;
use super::types::CallbackQuery;

/// Set the session cookie and send the browser home
fn session_response(state: &AppState, user: &User, clear_state: bool) -> Result<HttpResponse> {
    let token = state.jwt.issue(&SessionUser::from(user))?;
    let cookies = CookieBuilder::new(&state.auth.cookie);

    let mut builder = HttpResponse::Found();
    builder.cookie(cookies.build_session_cookie(token, state.jwt.validity_hours()));
    if clear_state {
        builder.cookie(cookies.build_expired_state_cookie());
    }
    Ok(builder
        .insert_header((LOCATION, state.auth.homepage_url.as_str()))
        .finish())
}

/// Start a login
///
/// With development login enabled the bootstrap admin is signed in directly.
pub async fn login(state: web::Data<AppState>) -> Result<HttpResponse> {
    if state.auth.dev_login {
        if state.auth.bootstrap_admin_email.is_empty() {
            return Err(ShortcutsError::internal(
                "dev_login requires auth.bootstrap_admin_email",
            ));
        }
        let admin = state
            .users
            .ensure_admin(
                &state.auth.bootstrap_admin_email,
                &state.auth.bootstrap_admin_name,
            )
            .await?;
        warn!("Development login issued a session for {}", admin.email);
        return session_response(&state, &admin, false);
    }

    let nonce = generate_secure_token();
    let location = state
        .identity
        .authorize_url(&nonce)
        .map_err(|e| ShortcutsError::internal(format!("{:#}", e)))?;
    let cookies = CookieBuilder::new(&state.auth.cookie);

    Ok(HttpResponse::TemporaryRedirect()
        .cookie(cookies.build_state_cookie(nonce))
        .insert_header((LOCATION, location))
        .finish())
}

/// Finish a login started by `login`
pub async fn callback(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<CallbackQuery>,
) -> Result<HttpResponse> {
    let expected = req
        .cookie(AUTH_STATE_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ShortcutsError::unauthorized("Missing auth state cookie"))?;

    if !bool::from(expected.as_bytes().ct_eq(query.state.as_bytes())) {
        return Err(ShortcutsError::unauthorized("Auth state mismatch"));
    }

    let identity = state.identity.exchange(&query.code).await.map_err(|e| {
        info!("Identity exchange failed: {:#}", e);
        ShortcutsError::unauthorized("Could not verify identity")
    })?;
    if !identity.verified_email {
        return Err(ShortcutsError::unauthorized("Email address is not verified"));
    }

    let user = state
        .users
        .find_by_email(&identity.email)
        .await?
        .ok_or_else(|| {
            info!("Login refused for unknown account {}", identity.email);
            ShortcutsError::unauthorized("No account for this email address")
        })?;
    if !user.active {
        return Err(ShortcutsError::unauthorized("User is not active"));
    }

    state.users.record_login(user.id).await?;
    info!("User {} logged in", user.email);

    session_response(&state, &user, true)
}

pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    let cookies = CookieBuilder::new(&state.auth.cookie);
    HttpResponse::TemporaryRedirect()
        .cookie(cookies.build_expired_session_cookie())
        .cookie(cookies.build_expired_state_cookie())
        .insert_header((LOCATION, state.auth.homepage_url.as_str()))
        .finish()
}
