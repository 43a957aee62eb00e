//! Error types shared by the CLI and the proxy server.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum FlightlineError {
    #[error("aviationstack {endpoint} endpoint error {status}: {body}")]
    UpstreamStatus {
        endpoint: &'static str,
        status: u16,
        body: String,
    },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("failed to parse {endpoint} response: {message}")]
    Parse {
        endpoint: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for FlightlineError {
    fn from(err: reqwest::Error) -> Self {
        FlightlineError::Transport(err.to_string())
    }
}
