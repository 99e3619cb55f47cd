use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutsError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    /// Constraint violation or lost connectivity while talking to the store
    Storage(String),
    /// A stored value that should always be well-formed is not
    DataIntegrity(String),
    Validation(String),
    InvalidArgument(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    Serialization(String),
    Internal(String),
}

impl ShortcutsError {
    /// 错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortcutsError::DatabaseConfig(_) => "E001",
            ShortcutsError::DatabaseConnection(_) => "E002",
            ShortcutsError::Storage(_) => "E003",
            ShortcutsError::DataIntegrity(_) => "E004",
            ShortcutsError::Validation(_) => "E005",
            ShortcutsError::InvalidArgument(_) => "E006",
            ShortcutsError::NotFound(_) => "E007",
            ShortcutsError::Unauthorized(_) => "E008",
            ShortcutsError::Forbidden(_) => "E009",
            ShortcutsError::Serialization(_) => "E010",
            ShortcutsError::Internal(_) => "E011",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ShortcutsError::DatabaseConfig(_) => "Database Configuration Error",
            ShortcutsError::DatabaseConnection(_) => "Database Connection Error",
            ShortcutsError::Storage(_) => "Storage Error",
            ShortcutsError::DataIntegrity(_) => "Data Integrity Error",
            ShortcutsError::Validation(_) => "Validation Error",
            ShortcutsError::InvalidArgument(_) => "Invalid Argument",
            ShortcutsError::NotFound(_) => "Resource Not Found",
            ShortcutsError::Unauthorized(_) => "Unauthorized",
            ShortcutsError::Forbidden(_) => "Forbidden",
            ShortcutsError::Serialization(_) => "Serialization Error",
            ShortcutsError::Internal(_) => "Internal Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ShortcutsError::DatabaseConfig(msg)
            | ShortcutsError::DatabaseConnection(msg)
            | ShortcutsError::Storage(msg)
            | ShortcutsError::DataIntegrity(msg)
            | ShortcutsError::Validation(msg)
            | ShortcutsError::InvalidArgument(msg)
            | ShortcutsError::NotFound(msg)
            | ShortcutsError::Unauthorized(msg)
            | ShortcutsError::Forbidden(msg)
            | ShortcutsError::Serialization(msg)
            | ShortcutsError::Internal(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    ///
    /// Forbidden answers 401 rather than 403: a signed-in user without admin
    /// rights is treated the same as an anonymous one.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ShortcutsError::Validation(_) | ShortcutsError::InvalidArgument(_) => {
                StatusCode::BAD_REQUEST
            }
            ShortcutsError::NotFound(_) => StatusCode::NOT_FOUND,
            ShortcutsError::Unauthorized(_) | ShortcutsError::Forbidden(_) => {
                StatusCode::UNAUTHORIZED
            }
            ShortcutsError::DatabaseConfig(_)
            | ShortcutsError::DatabaseConnection(_)
            | ShortcutsError::Storage(_)
            | ShortcutsError::DataIntegrity(_)
            | ShortcutsError::Serialization(_)
            | ShortcutsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 CLI）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortcutsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortcutsError {}

impl ShortcutsError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ShortcutsError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ShortcutsError::DatabaseConnection(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        ShortcutsError::Storage(msg.into())
    }

    pub fn data_integrity<T: Into<String>>(msg: T) -> Self {
        ShortcutsError::DataIntegrity(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortcutsError::Validation(msg.into())
    }

    pub fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        ShortcutsError::InvalidArgument(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortcutsError::NotFound(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        ShortcutsError::Unauthorized(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        ShortcutsError::Forbidden(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortcutsError::Serialization(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        ShortcutsError::Internal(msg.into())
    }
}

impl From<sea_orm::DbErr> for ShortcutsError {
    fn from(err: sea_orm::DbErr) -> Self {
        ShortcutsError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for ShortcutsError {
    fn from(err: std::io::Error) -> Self {
        ShortcutsError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for ShortcutsError {
    fn from(err: serde_json::Error) -> Self {
        ShortcutsError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for ShortcutsError {
    fn from(err: url::ParseError) -> Self {
        ShortcutsError::DataIntegrity(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ShortcutsError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ShortcutsError::Unauthorized(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortcutsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ShortcutsError::validation("bad id").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ShortcutsError::invalid_argument("HOUR").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ShortcutsError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ShortcutsError::storage("duplicate").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ShortcutsError::data_integrity("bad url").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_forbidden_maps_to_unauthorized() {
        assert_eq!(
            ShortcutsError::forbidden("not an admin").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ShortcutsError::unauthorized("no session").http_status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_db_err_becomes_storage_error() {
        let err: ShortcutsError = sea_orm::DbErr::Custom("UNIQUE constraint failed".into()).into();
        assert!(matches!(err, ShortcutsError::Storage(_)));
        assert!(err.message().contains("UNIQUE"));
    }

    #[test]
    fn test_url_parse_error_is_data_integrity() {
        let err: ShortcutsError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ShortcutsError::DataIntegrity(_)));
    }

    #[test]
    fn test_format_simple() {
        let err = ShortcutsError::not_found("shortcut 42");
        assert_eq!(err.format_simple(), "Resource Not Found: shortcut 42");
        assert_eq!(err.to_string(), err.format_simple());
    }
}
