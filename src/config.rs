use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Sentilens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the inference API token.
pub const API_KEY_VAR: &str = "HUGGINGFACE_API_KEY";
/// Optional override for the inference endpoint.
pub const API_URL_VAR: &str = "HUGGINGFACE_API_URL";
/// Optional override for the per-request timeout, in seconds.
pub const TIMEOUT_VAR: &str = "SENTILENS_TIMEOUT_SECS";

/// Hosted 3-class sentiment model (negative / neutral / positive).
pub const DEFAULT_API_URL: &str =
    "https://api-inference.huggingface.co/models/cardiffnlp/twitter-roberta-base-sentiment";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Pause between consecutive classifier calls in a batch.
pub const DEFAULT_DELAY_SECS: f64 = 1.0;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,sentilens_lib=info"
}

/// Directory that export files land in unless the caller picks one.
pub fn default_export_dir() -> PathBuf {
    PathBuf::from("data").join("exports")
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing credential: set the {0} environment variable")]
    MissingCredential(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// Connection settings for the classifier service.
///
/// Built once at startup; a blank API key is rejected here so that no batch
/// ever starts without credentials.
#[derive(Clone)]
pub struct ClassifierConfig {
    pub api_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl ClassifierConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential(API_KEY_VAR));
        }
        Ok(Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;
        let mut config = Self::new(api_key)?;

        if let Some(url) = lookup(API_URL_VAR).filter(|u| !u.trim().is_empty()) {
            config = config.with_api_url(url.trim());
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let timeout = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            config = config.with_timeout_secs(timeout);
        }

        Ok(config)
    }
}

impl fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
