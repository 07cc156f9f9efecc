//! Application configuration.
//!
//! Constants plus environment loading. The only required setting is the
//! Gemini API key; everything else has a sensible default so a fresh
//! checkout runs with a single exported variable.

use std::env;

// ═══════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════

/// Application-level constants
pub const APP_NAME: &str = "Swasthya Margdarshan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation temperature for triage calls. Kept low so structured
/// output stays stable across repeated submissions.
pub const TRIAGE_TEMPERATURE: f32 = 0.2;

/// Upper bound on request bodies. Photos arrive base64-encoded inside
/// the JSON payload, so this must comfortably exceed a phone photo.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Upper bound on symptom description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 8_000;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8600";

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    "swasthya=info".to_string()
}

// ═══════════════════════════════════════════════════════════
// Config types
// ═══════════════════════════════════════════════════════════

/// Connection settings for the generative model endpoint.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Endpoint root, without a trailing slash.
    pub base_url: String,
    /// Model identifier, e.g. "gemini-2.5-flash".
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    pub model: ModelConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Recognized variables:
    /// - `GEMINI_API_KEY` (or `GOOGLE_API_KEY`), required
    /// - `GEMINI_BASE_URL`
    /// - `SWASTHYA_MODEL`
    /// - `SWASTHYA_MODEL_TIMEOUT_SECS`
    /// - `SWASTHYA_BIND`
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = non_empty_var("GEMINI_API_KEY")
            .or_else(|| non_empty_var("GOOGLE_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url =
            non_empty_var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = non_empty_var("SWASTHYA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match non_empty_var("SWASTHYA_MODEL_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: "SWASTHYA_MODEL_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let bind_addr =
            non_empty_var("SWASTHYA_BIND").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            bind_addr,
            model: ModelConfig {
                api_key,
                base_url,
                model,
                timeout_secs,
            },
        })
    }
}

/// Read an environment variable, treating empty or whitespace-only
/// values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No API key configured. Set GEMINI_API_KEY (or GOOGLE_API_KEY)")]
    MissingApiKey,
    #[error("Invalid {var} value: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
