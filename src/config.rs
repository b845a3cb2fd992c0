//! Environment-driven configuration
//!
//! Loaded once at startup, after `dotenvy` pulls in `.env`. A missing or
//! unset engine binary is not a startup error: the server runs with engine
//! play disabled and the page says so.

use std::net::SocketAddr;
use std::path::PathBuf;

use kibitz_uci::EngineOptions;

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DEPTH: u8 = 18;
const DEFAULT_THREADS: u32 = 4;
const DEFAULT_HASH_MB: u32 = 2048;

const ENGINE_WARNING: &str =
    "Stockfish not configured. Set STOCKFISH_PATH to enable engine play.";

/// Errors produced while reading the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Top-level application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address for the web server.
    pub addr: SocketAddr,
    pub engine: EngineConfig,
}

/// External engine settings. Depth, threads and hash are fixed for the
/// process lifetime; there is no per-game strength control.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Engine binary; `None` or a missing file disables engine play.
    pub path: Option<PathBuf>,
    /// Search depth per engine move.
    pub depth: u8,
    /// UCI `Threads` option.
    pub threads: u32,
    /// UCI `Hash` option (MiB).
    pub hash_mb: u32,
}

impl AppConfig {
    /// Reads configuration from the environment, with defaults suited to a
    /// local single-player setup.
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        let addr = env_or("KIBITZ_ADDR", DEFAULT_ADDR);
        let addr: SocketAddr = addr.parse().map_err(|_| ConfigError::Invalid {
            name: "KIBITZ_ADDR",
            value: addr,
        })?;

        let engine = EngineConfig {
            path: std::env::var("STOCKFISH_PATH").ok().map(PathBuf::from),
            depth: parse_env("STOCKFISH_DEPTH", DEFAULT_DEPTH)?,
            threads: parse_env("STOCKFISH_THREADS", DEFAULT_THREADS)?,
            hash_mb: parse_env("STOCKFISH_HASH_MB", DEFAULT_HASH_MB)?,
        };

        Ok(AppConfig { addr, engine })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: None,
            depth: DEFAULT_DEPTH,
            threads: DEFAULT_THREADS,
            hash_mb: DEFAULT_HASH_MB,
        }
    }
}

impl EngineConfig {
    /// True when a binary is configured and present on disk.
    pub fn available(&self) -> bool {
        self.path.as_deref().is_some_and(|p| p.exists())
    }

    /// Warning line for the page when engine play cannot work.
    pub fn warning(&self) -> Option<String> {
        if self.available() {
            None
        } else {
            Some(ENGINE_WARNING.to_string())
        }
    }

    /// Driver options derived from this config.
    pub fn options(&self) -> EngineOptions {
        EngineOptions {
            threads: self.threads,
            hash_mb: self.hash_mb,
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_or_missing_binary_is_unavailable() {
        let config = EngineConfig::default();
        assert!(!config.available());
        assert!(config.warning().is_some());

        let config = EngineConfig {
            path: Some(PathBuf::from("/definitely/not/a/real/engine")),
            ..EngineConfig::default()
        };
        assert!(!config.available());
        assert_eq!(
            config.warning().as_deref(),
            Some("Stockfish not configured. Set STOCKFISH_PATH to enable engine play.")
        );
    }

    #[test]
    fn present_binary_is_available() {
        // Any file guaranteed to exist works for the check.
        let config = EngineConfig {
            path: Some(PathBuf::from("/bin/sh")),
            ..EngineConfig::default()
        };
        if config.path.as_deref().is_some_and(|p| p.exists()) {
            assert!(config.available());
            assert!(config.warning().is_none());
        }
    }

    #[test]
    fn driver_options_mirror_the_config() {
        let config = EngineConfig {
            threads: 4,
            hash_mb: 2048,
            ..EngineConfig::default()
        };
        let options = config.options();
        assert_eq!(options.threads, 4);
        assert_eq!(options.hash_mb, 2048);
    }
}
