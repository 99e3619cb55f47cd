use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short code mapped to its destination URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub created_by: i64,
    pub updated_at: DateTime<Utc>,
    pub updated_by: i64,
}

/// Shortcut fields supplied by the caller on insert; timestamps are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewShortcut {
    pub code: String,
    pub url: String,
    pub created_by: i64,
}

#[derive(Debug, Clone)]
pub struct ShortcutUpdate {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub updated_by: i64,
}

/// 列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct ShortcutFilter {
    /// Only codes starting with this string
    pub code_prefix: Option<String>,
    /// Page size; zero or negative returns every match
    pub limit: i64,
    /// 1-indexed
    pub page: i64,
}

/// One resolution event for a known shortcut
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visit {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub shortcut_id: i64,
    pub ip_address: String,
    pub path: String,
    pub referer: String,
    pub utm_source: String,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct NewVisit {
    pub timestamp: DateTime<Utc>,
    pub shortcut_id: i64,
    pub ip_address: String,
    pub path: String,
    pub referer: String,
    pub utm_source: String,
    pub user_agent: String,
}

impl NewVisit {
    /// A visit stamped with the current time
    pub fn now(shortcut_id: i64) -> Self {
        Self {
            timestamp: Utc::now(),
            shortcut_id,
            ip_address: String::new(),
            path: String::new(),
            referer: String::new(),
            utm_source: String::new(),
            user_agent: String::new(),
        }
    }
}

/// Leaderboard row, materialized per query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopShortcut {
    pub id: i64,
    pub code: String,
    pub total_visits: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_logged_in: Option<DateTime<Utc>>,
    pub active: bool,
    pub admin: bool,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub active: bool,
    pub admin: bool,
}

#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub admin: bool,
}
