//! Runtime configuration parsed from environment variables.
//!
//! Every knob has a default; missing or unparseable values fall back to it.

use std::path::PathBuf;

use crate::services::toast::DEFAULT_DURATION_MS;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PREFS_PATH: &str = "prefs.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Listen port (`PORT`).
    pub port: u16,
    /// Auto-dismiss delay for toasts that do not set one (`TOAST_DEFAULT_DURATION_MS`).
    pub toast_default_duration_ms: u64,
    /// Preference file location (`PREFS_PATH`).
    pub prefs_path: PathBuf,
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `from_env` passes the process environment.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: parse_or(lookup("PORT"), DEFAULT_PORT),
            toast_default_duration_ms: parse_or(lookup("TOAST_DEFAULT_DURATION_MS"), DEFAULT_DURATION_MS),
            prefs_path: lookup("PREFS_PATH")
                .filter(|v| !v.trim().is_empty())
                .map_or_else(|| PathBuf::from(DEFAULT_PREFS_PATH), PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T>(raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
{
    raw.and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
