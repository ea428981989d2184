//! Environment-driven configuration.
//!
//! Every knob comes from a `RENTMATCH_*` variable (a local `.env` file is
//! honored for development). Missing variables fall back to defaults suited
//! to local runs; malformed values fail startup rather than being guessed at.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILTER: &str = "info";

/// Deployment stage the service believes it is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
}

/// HTTP bind settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Tracing directive string, e.g. "info" or "rentmatch=debug,info".
    pub log_filter: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("RENTMATCH_PORT '{value}' is not a valid port number")]
    Port {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("RENTMATCH_HOST '{value}' is neither 'localhost' nor an IP address")]
    Host {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(&var_or("RENTMATCH_ENV", "development"));
        let host = var_or("RENTMATCH_HOST", DEFAULT_HOST);
        let raw_port = var_or("RENTMATCH_PORT", &DEFAULT_PORT.to_string());
        let port = raw_port.parse::<u16>().map_err(|source| ConfigError::Port {
            value: raw_port.clone(),
            source,
        })?;
        let log_filter = var_or("RENTMATCH_LOG", DEFAULT_LOG_FILTER);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_filter },
        })
    }
}

impl ServerConfig {
    /// Resolve the bind address. "localhost" is accepted as an alias for the
    /// loopback address; anything else must be an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host.parse().map_err(|source| ConfigError::Host {
                value: self.host.clone(),
                source,
            })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

fn var_or(name: &str, fallback: &str) -> String {
    env::var(name).unwrap_or_else(|_| fallback.to_string())
}
