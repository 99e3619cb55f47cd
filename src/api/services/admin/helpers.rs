//! Admin API 帮助函数

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::api::constants::{AUTH_STATE_COOKIE_NAME, AUTH_STATE_MAX_AGE_SECS, SESSION_COOKIE_NAME};
use crate::config::{CookieConfig, SameSitePolicy};
use crate::errors::{Result, ShortcutsError};

use super::types::ErrorBody;

impl ResponseError for ShortcutsError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.http_status();
        if status.is_server_error() {
            error!("{}", self.format_simple());
        }

        HttpResponse::build(status)
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ErrorBody {
                code: self.code().to_string(),
                error: self.error_type().to_string(),
                message: self.message().to_string(),
            })
    }
}

/// Path ids must be integers
pub fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| ShortcutsError::validation(format!("Invalid id: '{}'", raw)))
}

/// Cookie 构建器
pub struct CookieBuilder {
    same_site: SameSite,
    secure: bool,
    domain: Option<String>,
}

impl CookieBuilder {
    pub fn new(config: &CookieConfig) -> Self {
        let same_site = match config.same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::None => SameSite::None,
            SameSitePolicy::Lax => SameSite::Lax,
        };

        Self {
            same_site,
            secure: config.secure,
            domain: config.domain.clone(),
        }
    }

    fn build_cookie_base(
        &self,
        name: &'static str,
        value: String,
        max_age: CookieDuration,
    ) -> Cookie<'static> {
        let mut cookie = Cookie::new(name, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(self.same_site);
        cookie.set_max_age(max_age);
        if let Some(ref domain) = self.domain {
            cookie.set_domain(domain.clone());
        }
        cookie
    }

    pub fn build_session_cookie(&self, token: String, hours: u64) -> Cookie<'static> {
        self.build_cookie_base(
            SESSION_COOKIE_NAME,
            token,
            CookieDuration::hours(hours as i64),
        )
    }

    pub fn build_state_cookie(&self, nonce: String) -> Cookie<'static> {
        self.build_cookie_base(
            AUTH_STATE_COOKIE_NAME,
            nonce,
            CookieDuration::seconds(AUTH_STATE_MAX_AGE_SECS),
        )
    }

    pub fn build_expired_session_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(SESSION_COOKIE_NAME, String::new(), CookieDuration::ZERO)
    }

    pub fn build_expired_state_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(AUTH_STATE_COOKIE_NAME, String::new(), CookieDuration::ZERO)
    }
}
