//! Admin API 类型定义

use serde::{Deserialize, Serialize};

use crate::storage::{Shortcut, User};

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShortcutRequest {
    pub code: String,
    pub url: String,
}

/// `GET /api/shortcuts` query; missing or malformed numbers count as zero
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShortcutListQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

impl ShortcutListQuery {
    fn number(raw: &Option<String>) -> i64 {
        raw.as_deref()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        Self::number(&self.limit)
    }

    pub fn page(&self) -> i64 {
        Self::number(&self.page)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortcutListResponse {
    pub shortcuts: Vec<Shortcut>,
    pub total_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// OAuth callback query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub code: String,
}
