//! API 模块常量定义

/// Session token cookie
pub const SESSION_COOKIE_NAME: &str = "jwt";

/// OAuth state nonce cookie
pub const AUTH_STATE_COOKIE_NAME: &str = "auth_state";

/// Lifetime of the OAuth state cookie in seconds
pub const AUTH_STATE_MAX_AGE_SECS: i64 = 60;
