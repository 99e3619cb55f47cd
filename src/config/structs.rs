use serde::{Deserialize, Serialize};

/// Cookie SameSite 策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum SameSitePolicy {
    Strict,
    #[default]
    Lax,
    None,
}

impl std::fmt::Display for SameSitePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "Strict"),
            Self::Lax => write!(f, "Lax"),
            Self::None => write!(f, "None"),
        }
    }
}

impl std::str::FromStr for SameSitePolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lax" => Ok(Self::Lax),
            "none" => Ok(Self::None),
            _ => Err(format!(
                "Invalid SameSite policy: '{}'. Valid: Strict, Lax, None",
                s
            )),
        }
    }
}

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: listen address and worker count
/// - database: connection string and pool
/// - cache: read-through cache for code lookups
/// - redirect: fallback destination and visit recording budget
/// - auth: session tokens, cookies, OAuth client, initial admin
/// - cors: cross-origin policy for the admin frontend
/// - logging: level, format, file output
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub redirect: RedirectConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config file > 默认值
    /// ENV 前缀：US，分隔符：__
    /// 示例：US__SERVER__PORT=9999
    pub fn load(path: &str) -> Self {
        use config::{Config, Environment, File};

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("US")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .with_list_parse_key("auth.oauth.scopes")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// 0 uses one worker per CPU
    #[serde(default)]
    pub workers: usize,
    /// Take the client address from X-Forwarded-For / X-Real-IP
    #[serde(default)]
    pub trust_forwarded_headers: bool,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    /// Seconds
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

/// Read-through cache for code lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectConfig {
    /// Unknown codes redirect to this base with the code appended
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
    /// Upper bound for a single visit insert
    #[serde(default = "default_visit_timeout_ms")]
    pub visit_timeout_ms: u64,
}

/// 认证配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret; a random one is generated at startup when empty
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_session_hours")]
    pub session_hours: u64,
    /// Where login, callback and logout send the browser afterwards
    #[serde(default = "default_homepage_url")]
    pub homepage_url: String,
    /// Skip the identity provider and sign in as the bootstrap admin
    #[serde(default)]
    pub dev_login: bool,
    #[serde(default)]
    pub bootstrap_admin_email: String,
    #[serde(default = "default_bootstrap_admin_name")]
    pub bootstrap_admin_name: String,
    #[serde(default)]
    pub cookie: CookieConfig,
    #[serde(default)]
    pub oauth: OAuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CookieConfig {
    #[serde(default)]
    pub same_site: SameSitePolicy,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub domain: Option<String>,
}

/// OAuth2 authorization-code client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_oauth_redirect_url")]
    pub redirect_url: String,
    #[serde(default = "default_oauth_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_oauth_token_url")]
    pub token_url: String,
    #[serde(default = "default_oauth_userinfo_url")]
    pub userinfo_url: String,
    #[serde(default = "default_oauth_scopes")]
    pub scopes: Vec<String>,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_true")]
    pub allow_credentials: bool,
    #[serde(default = "default_cors_max_age")]
    pub max_age: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_true")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_true() -> bool {
    true
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "sqlite://url-shortcuts.db?mode=rwc".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_cache_ttl() -> u64 {
    5
}

fn default_cache_capacity() -> u64 {
    10000
}

fn default_fallback_url() -> String {
    "https://fallback.example/".to_string()
}

fn default_visit_timeout_ms() -> u64 {
    2000
}

fn default_session_hours() -> u64 {
    8
}

fn default_homepage_url() -> String {
    "/".to_string()
}

fn default_bootstrap_admin_name() -> String {
    "Admin".to_string()
}

fn default_oauth_redirect_url() -> String {
    "http://localhost:8080/auth/callback".to_string()
}

fn default_oauth_auth_url() -> String {
    "https://accounts.google.com/o/oauth2/auth".to_string()
}

fn default_oauth_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_oauth_userinfo_url() -> String {
    "https://www.googleapis.com/oauth2/v2/userinfo".to_string()
}

fn default_oauth_scopes() -> Vec<String> {
    vec!["email".to_string(), "profile".to_string()]
}

fn default_cors_max_age() -> usize {
    300
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: 0,
            trust_forwarded_headers: false,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_cache_ttl(),
            max_capacity: default_cache_capacity(),
        }
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            fallback_url: default_fallback_url(),
            visit_timeout_ms: default_visit_timeout_ms(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            session_hours: default_session_hours(),
            homepage_url: default_homepage_url(),
            dev_login: false,
            bootstrap_admin_email: String::new(),
            bootstrap_admin_name: default_bootstrap_admin_name(),
            cookie: CookieConfig::default(),
            oauth: OAuthConfig::default(),
        }
    }
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_url: default_oauth_redirect_url(),
            auth_url: default_oauth_auth_url(),
            token_url: default_oauth_token_url(),
            userinfo_url: default_oauth_userinfo_url(),
            scopes: default_oauth_scopes(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
            allow_credentials: true,
            max_age: default_cors_max_age(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.session_hours, 8);
        assert_eq!(config.auth.cookie.same_site, SameSitePolicy::Lax);
        assert!(!config.auth.cookie.secure);
        assert!(config.cache.enabled);
        assert_eq!(config.redirect.fallback_url, "https://fallback.example/");
    }

    #[test]
    fn test_same_site_from_str() {
        assert_eq!("strict".parse::<SameSitePolicy>(), Ok(SameSitePolicy::Strict));
        assert_eq!("NONE".parse::<SameSitePolicy>(), Ok(SameSitePolicy::None));
        assert!("sideways".parse::<SameSitePolicy>().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: StaticConfig = toml::from_str(
            r#"
            [redirect]
            fallback_url = "https://example.org/"

            [auth.cookie]
            same_site = "Strict"
            secure = true
            "#,
        )
        .unwrap();

        assert_eq!(config.redirect.fallback_url, "https://example.org/");
        assert_eq!(config.redirect.visit_timeout_ms, 2000);
        assert_eq!(config.auth.cookie.same_site, SameSitePolicy::Strict);
        assert!(config.auth.cookie.secure);
        assert_eq!(config.database.pool_size, 10);
    }

    #[test]
    fn test_sample_config_roundtrips_through_toml() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[redirect]"));
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[server]\nport = 9191\n").unwrap();

        let config = StaticConfig::load(path.to_str().unwrap());
        assert_eq!(config.server.port, 9191);
    }
}
