/// Default CORS origin patterns: the extension itself, local development and
/// preview deployments.
pub const DEFAULT_CORS_ORIGINS: &str =
    "chrome-extension://*,http://localhost:*,https://*.vercel.app";

/// Errors raised while loading [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Deployment environment, selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn is_development(self) -> bool {
        self == AppEnv::Development
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppEnv::Development => "development",
            AppEnv::Production => "production",
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// PostgreSQL connection string. Required.
    pub database_url: String,
    /// Maximum pool size (default: `20`).
    pub db_max_connections: u32,
    /// Allowed CORS origin patterns, parsed from comma-separated `CORS_ORIGINS`.
    /// A `*` matches any run of characters except `/`.
    pub cors_origins: Vec<String>,
    /// `development` exposes internal error detail in 500 responses.
    pub environment: AppEnv,
    /// Take the caller address from `X-Forwarded-For` (default: `false`).
    pub trust_proxy: bool,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var              | Default                                   |
    /// |----------------------|-------------------------------------------|
    /// | `DATABASE_URL`       | required                                  |
    /// | `HOST`               | `0.0.0.0`                                 |
    /// | `PORT`               | `3000`                                    |
    /// | `DB_MAX_CONNECTIONS` | `20`                                      |
    /// | `CORS_ORIGINS`       | [`DEFAULT_CORS_ORIGINS`]                  |
    /// | `APP_ENV`            | `production`                              |
    /// | `TRUST_PROXY`        | `false`                                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = parse_or("PORT", lookup("PORT"), 3000_u16, "a valid port number")?;

        let db_max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            lookup("DB_MAX_CONNECTIONS"),
            aimode_db::DEFAULT_MAX_CONNECTIONS,
            "a positive integer",
        )?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let environment = match lookup("APP_ENV").as_deref().map(str::trim) {
            Some("development") | Some("dev") => AppEnv::Development,
            Some("production") | Some("prod") | Some("") | None => AppEnv::Production,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "APP_ENV",
                    expected: "'development' or 'production'",
                    value: other.to_string(),
                })
            }
        };

        let trust_proxy = match lookup("TRUST_PROXY").as_deref().map(str::trim) {
            None | Some("") => false,
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "TRUST_PROXY",
                    expected: "a boolean",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            cors_origins,
            environment,
            trust_proxy,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
