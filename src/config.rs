//! Service configuration loaded from environment variables.
//!
//! Loaded once at startup, before the router is built.
//!
//! - `LISTEN`: bind address (default: `0.0.0.0:9999`)
//! - `LOG_LEVEL`: filter used when `RUST_LOG` is unset (default: `info`)
//! - `LOG_FORMAT`: `text` or `json` (default: `text`)

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::Error;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:9999";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format of the log subscriber.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::config("LOG_FORMAT", format!("expected `text` or `json`, got `{other}`"))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let listen = lookup("LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_owned());
        let listen_addr = listen
            .parse()
            .map_err(|e| Error::config("LISTEN", format!("`{listen}`: {e}")))?;

        let log_level = lookup("LOG_LEVEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned());

        let log_format = match lookup("LOG_FORMAT") {
            Some(v) => v.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self { listen_addr, log_level, log_format })
    }
}
