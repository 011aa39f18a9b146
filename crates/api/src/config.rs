use anyhow::Context;
use bank_auth::TokenConfig;

/// Deployment environment, selecting the log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("development") {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the token key have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address for both listeners (default: `0.0.0.0`).
    pub host: String,
    /// HTTP port (default: `8080`).
    pub port: u16,
    /// gRPC port (default: `9090`).
    pub grpc_port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub environment: Environment,
    /// Token key and lifetimes.
    pub token: TokenConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8080`                     |
    /// | `GRPC_PORT`            | `9090`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `ENVIRONMENT`          | `development`              |
    ///
    /// Token settings are read by [`TokenConfig::from_env`].
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .context("PORT must be a valid u16")?;

        let grpc_port: u16 = std::env::var("GRPC_PORT")
            .unwrap_or_else(|_| "9090".into())
            .parse()
            .context("GRPC_PORT must be a valid u16")?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        let environment = Environment::parse(
            &std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        );

        let token = TokenConfig::from_env()?;

        Ok(Self {
            host,
            port,
            grpc_port,
            cors_origins,
            request_timeout_secs,
            environment,
            token,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
