//! Client configuration.
//!
//! Resolution order, lowest to highest precedence: built-in defaults, a TOML
//! file, the `FEEDBACK_LENS_BASE_URL` environment variable, then explicit
//! overrides from the command line.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::UiError;

/// Environment variable that overrides the configured base URL.
pub const BASE_URL_ENV: &str = "FEEDBACK_LENS_BASE_URL";

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "feedback-lens.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin of the analysis API, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Per-request timeout. `None` waits forever.
    pub request_timeout_secs: Option<u64>,
    /// Where the native key-value store (session id) is persisted.
    pub state_file: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: None,
            state_file: default_state_file(),
            log_filter: "feedback_lens=info".to_string(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_state_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("feedback-lens")
        .join("state.json")
}

#[cfg(target_arch = "wasm32")]
fn default_state_file() -> PathBuf {
    PathBuf::from("state.json")
}

impl ClientConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_toml_str(s: &str) -> Result<Self, UiError> {
        let cfg: ClientConfig = toml::from_str(s).map_err(|e| UiError::Config(e.to_string()))?;
        cfg.validated()
    }

    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] when it exists, then
    /// apply the environment override.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Result<Self, UiError> {
        let mut cfg = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .map_err(|e| UiError::Config(format!("{}: {e}", p.display())))?;
                Self::from_toml_str(&raw)?
            }
            None => {
                let default_path = std::path::Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    let raw = std::fs::read_to_string(default_path)
                        .map_err(|e| UiError::Config(format!("{DEFAULT_CONFIG_FILE}: {e}")))?;
                    Self::from_toml_str(&raw)?
                } else {
                    Self::default()
                }
            }
        };
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            cfg.base_url = url;
        }
        cfg.validated()
    }

    /// Replace the base URL (CLI flag) and re-validate.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, UiError> {
        self.base_url = base_url.into();
        self.validated()
    }

    fn validated(mut self) -> Result<Self, UiError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(UiError::Config(format!(
                "base_url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        if self.request_timeout_secs == Some(0) {
            return Err(UiError::Config("request_timeout_secs must be positive".into()));
        }
        Ok(self)
    }
}
