use coursehub_db::ordering::OrderingMode;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// When `true`, order assignment runs inside an advisory-locked
    /// transaction instead of the legacy unguarded read-then-insert.
    pub strict_ordering: bool,
    /// How long the cached subject catalog stays fresh (default: `300`).
    pub subject_cache_ttl_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default     |
    /// |---------------------------|-------------|
    /// | `HOST`                    | `0.0.0.0`   |
    /// | `PORT`                    | `3000`      |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`        |
    /// | `STRICT_ORDERING`         | `false`     |
    /// | `SUBJECT_CACHE_TTL_SECS`  | `300`       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let strict_ordering = std::env::var("STRICT_ORDERING")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let subject_cache_ttl_secs: u64 = std::env::var("SUBJECT_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("SUBJECT_CACHE_TTL_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            strict_ordering,
            subject_cache_ttl_secs,
            jwt,
        }
    }

    /// The ordering mode repositories should use for inserts.
    pub fn ordering_mode(&self) -> OrderingMode {
        if self.strict_ordering {
            OrderingMode::Strict
        } else {
            OrderingMode::Legacy
        }
    }
}
