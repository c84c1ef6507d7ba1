//! Runtime configuration read from the environment (after `.env` is loaded).

use anyhow::{Context, Result, bail};
use std::str::FromStr;
use std::time::Duration;

use crate::analysis::Thresholds;
use crate::infra::petitions::DEFAULT_PETITIONS_URL;

pub const DEFAULT_LOG_FILE: &str = "logs/gov_sentiment.log";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Petitions endpoint. Read from PETITIONS_API_URL.
    pub petitions_url: String,
    /// Per-request HTTP timeout. Read from HTTP_TIMEOUT_SECS.
    pub http_timeout: Duration,
    /// JSON log file; rotated daily. Read from LOG_FILE_PATH.
    pub log_file_path: String,
    /// Read from SENTIMENT_POSITIVE_THRESHOLD / SENTIMENT_NEGATIVE_THRESHOLD.
    pub thresholds: Thresholds,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            petitions_url: DEFAULT_PETITIONS_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            log_file_path: DEFAULT_LOG_FILE.to_string(),
            thresholds: Thresholds::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let positive = parse_var(&lookup, "SENTIMENT_POSITIVE_THRESHOLD")?
            .unwrap_or(defaults.thresholds.positive);
        let negative = parse_var(&lookup, "SENTIMENT_NEGATIVE_THRESHOLD")?
            .unwrap_or(defaults.thresholds.negative);
        let Some(thresholds) = Thresholds::new(positive, negative) else {
            bail!("invalid sentiment thresholds: positive {positive}, negative {negative}");
        };

        Ok(Self {
            petitions_url: lookup("PETITIONS_API_URL").unwrap_or(defaults.petitions_url),
            http_timeout: parse_var(&lookup, "HTTP_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            log_file_path: lookup("LOG_FILE_PATH").unwrap_or(defaults.log_file_path),
            thresholds,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{key} has invalid value '{raw}'"))
        })
        .transpose()
}
