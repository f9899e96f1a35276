use std::env;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration, read from `HOMELOAN_*` environment variables
/// (and a `.env` file when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(
            &env::var("HOMELOAN_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("HOMELOAN_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let raw_port = env::var("HOMELOAN_PORT").unwrap_or_else(|_| "3000".to_string());
        let port = raw_port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(raw_port))?;

        let log_level = env::var("HOMELOAN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self.host.parse().map_err(|source| ConfigError::InvalidHost {
            host: self.host.clone(),
            source,
        })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HOMELOAN_PORT must be a valid u16, got '{0}'")]
    InvalidPort(String),

    #[error("HOMELOAN_HOST must parse to an IPv4 or IPv6 address, got '{host}'")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
