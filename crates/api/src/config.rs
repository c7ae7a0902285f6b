use vitals_core::admin_session::DEFAULT_SESSION_MAX_AGE_SECS;

/// Server configuration loaded from environment variables.
///
/// All fields except the session secret have defaults suitable for local
/// development.
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
    /// Admin session cookie settings.
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
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

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session: SessionConfig::from_env(),
        }
    }
}

/// Admin session cookie configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 key used to sign `admin_token`.
    pub secret: String,
    /// Cookie lifetime in seconds (default: 8 hours).
    pub max_age_secs: i64,
    /// Add the `Secure` attribute to cookies (default: `false`).
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var                      | Required | Default |
    /// |------------------------------|----------|---------|
    /// | `ADMIN_SESSION_SECRET`       | **yes**  | --      |
    /// | `ADMIN_SESSION_MAX_AGE_SECS` | no       | `28800` |
    /// | `COOKIE_SECURE`              | no       | `false` |
    ///
    /// # Panics
    ///
    /// Panics if `ADMIN_SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("ADMIN_SESSION_SECRET")
            .expect("ADMIN_SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "ADMIN_SESSION_SECRET must not be empty");

        let max_age_secs: i64 = std::env::var("ADMIN_SESSION_MAX_AGE_SECS")
            .unwrap_or_else(|_| DEFAULT_SESSION_MAX_AGE_SECS.to_string())
            .parse()
            .expect("ADMIN_SESSION_MAX_AGE_SECS must be a valid i64");

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Self {
            secret,
            max_age_secs,
            cookie_secure,
        }
    }
}
