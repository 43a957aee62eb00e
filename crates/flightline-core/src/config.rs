//! Environment-driven configuration for the two entry points.
//!
//! Each binary reads its own credential variable and fails fast when it is
//! absent, before any argument handling or network work.

use crate::errors::FlightlineError;

/// Environment variable naming the CLI's upstream credential.
pub const CLI_API_KEY_VAR: &str = "AVIATIONSTACK_API_KEY";
/// Environment variable naming the server's upstream credential.
pub const SERVER_API_KEY_VAR: &str = "API_KEY";

const API_HOST: &str = "api.aviationstack.com/v1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api_key: String,
}

impl CliConfig {
    pub fn from_env() -> Result<Self, FlightlineError> {
        let api_key = std::env::var(CLI_API_KEY_VAR)
            .map_err(|_| FlightlineError::Config(format!("Cannot find {CLI_API_KEY_VAR}")))?;
        Ok(Self { api_key })
    }
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub api_key: String,
    pub port: u16,
    pub use_https: bool,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, FlightlineError> {
        let api_key = std::env::var(SERVER_API_KEY_VAR)
            .map_err(|_| FlightlineError::Config(format!("Missing {SERVER_API_KEY_VAR} in .env")))?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| FlightlineError::Config(format!("Invalid PORT value '{raw}'")))?,
            Err(_) => DEFAULT_PORT,
        };

        // The upstream scheme is HTTPS only when the flag is exactly "true".
        let use_https = std::env::var("USE_HTTPS").map(|v| v == "true").unwrap_or(false);

        Ok(Self {
            api_key,
            port,
            use_https,
        })
    }

    /// Upstream base for the proxy. The CLI always talks HTTPS; only the
    /// server's scheme is switchable.
    pub fn api_base(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        format!("{scheme}://{API_HOST}")
    }
}
