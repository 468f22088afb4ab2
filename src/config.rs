//! Server configuration from environment variables.
//!
//! Missing or unparsable values fall back to defaults with a log line.

use crate::store::StoreConfig;
use std::fmt::Display;
use std::num::NonZeroU64;
use std::str::FromStr;
use std::time::Duration;

/// Minimum length of `SESSION_KEY` accepted as a cookie signing key.
pub const SESSION_KEY_MIN_LEN: usize = 64;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub inactivity_timeout: Duration,
    pub cleanup_interval: Duration,
    pub max_write_retries: u32,
    /// Cookie signing secret. `None` means a random key per process.
    pub session_key: Option<String>,
    /// Mark the session cookie `Secure`. Only enable behind HTTPS.
    pub cookie_secure: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            inactivity_timeout: Duration::from_secs(12 * 3600),
            cleanup_interval: Duration::from_secs(30 * 60),
            max_write_retries: 5,
            session_key: None,
            cookie_secure: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let session_key = lookup("SESSION_KEY").filter(|k| {
            let long_enough = k.len() >= SESSION_KEY_MIN_LEN;
            if !long_enough {
                log::warn!(
                    "SESSION_KEY shorter than {} bytes, using a generated key",
                    SESSION_KEY_MIN_LEN
                );
            }
            long_enough
        });
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            inactivity_timeout: secs_or(&lookup, "INACTIVITY_TIMEOUT_SECS", defaults.inactivity_timeout),
            cleanup_interval: secs_or(&lookup, "CLEANUP_INTERVAL_SECS", defaults.cleanup_interval),
            max_write_retries: parse_or(&lookup, "MAX_WRITE_RETRIES", defaults.max_write_retries),
            session_key,
            cookie_secure: parse_or(&lookup, "COOKIE_SECURE", defaults.cookie_secure),
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            max_write_retries: self.max_write_retries,
            inactivity_timeout: self.inactivity_timeout,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("Invalid {} value {:?} ({}), using default {}", key, raw, e, default);
            default
        }),
    }
}

/// Whole seconds, at least 1: `tokio::time::interval` rejects a zero period.
fn secs_or<F>(lookup: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    let default = NonZeroU64::new(default.as_secs()).unwrap_or(NonZeroU64::MIN);
    Duration::from_secs(parse_or(lookup, key, default).get())
}
