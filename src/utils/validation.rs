//! Input checks for shortcut writes

use url::Url;

use crate::errors::{Result, ShortcutsError};

/// First path segments owned by the service's own routes
pub const RESERVED_CODES: &[&str] = &["api", "auth", "healthz", "login", "logout"];

const DANGEROUS_PROTOCOLS: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// A code must be non-empty, must not start with `/`, and must not shadow
/// one of the service's own routes.
pub fn validate_code(code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(ShortcutsError::validation("Code cannot be empty"));
    }
    if code.starts_with('/') {
        return Err(ShortcutsError::validation("Code must not start with '/'"));
    }
    if code.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
        return Err(ShortcutsError::validation(
            "Code must not contain whitespace, '?' or '#'",
        ));
    }

    let first_segment = code.split('/').next().unwrap_or(code);
    if RESERVED_CODES.contains(&first_segment) {
        return Err(ShortcutsError::validation(format!(
            "Code '{}' is reserved",
            code
        )));
    }
    Ok(())
}

/// Destinations must be absolute http(s) URLs
pub fn validate_url(url: &str) -> Result<Url> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ShortcutsError::validation("URL cannot be empty"));
    }

    let lower = trimmed.to_lowercase();
    if let Some(proto) = DANGEROUS_PROTOCOLS.iter().find(|p| lower.starts_with(*p)) {
        return Err(ShortcutsError::validation(format!(
            "URL protocol is not allowed: {}",
            proto
        )));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| ShortcutsError::validation(format!("Invalid URL format: {}", e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ShortcutsError::validation(format!(
            "URL must start with http:// or https://, got {}:",
            other
        ))),
    }
}
