//! Backend connection configuration.
//!
//! Supplied externally as a JSON object (the page sets
//! `window.TODO_APP_CONFIG` from `config.js`):
//!
//! ```json
//! {
//!   "firebase": {
//!     "apiKey": "...",
//!     "authDomain": "my-app.firebaseapp.com",
//!     "projectId": "my-app",
//!     "appId": "1:123:web:abc"
//!   },
//!   "collection": "todos",
//!   "logLevel": "info"
//! }
//! ```
//!
//! ## Required
//! - `firebase.apiKey`, `firebase.authDomain`, `firebase.projectId`, `firebase.appId`
//!
//! ## Optional
//! - `firebase.storageBucket`, `firebase.messagingSenderId`
//! - `collection` - document collection holding todos (default: `todos`)
//! - `logLevel` - `trace` | `debug` | `info` | `warn` | `error` (default: `info`)

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_COLLECTION: &str = "todos";

/// Copy-paste leftovers that mean the config was never filled in (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace-me",
    "placeholder",
    "xxx",
    "insert-",
    "put-your",
    "<",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration not found: {0}")]
    Missing(String),
    #[error("Malformed configuration: {0}")]
    Malformed(String),
    #[error("Missing configuration value: {0}")]
    MissingValue(String),
    #[error("Invalid configuration value {0}: {1}")]
    InvalidValue(String, String),
}

/// Options passed verbatim to `firebase.initializeApp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseOptions {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub auth_domain: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging_sender_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub firebase: FirebaseOptions,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl AppConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JSON is malformed, a required value is
    /// missing, or a value is still a placeholder.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check required values and reject placeholders.
    ///
    /// # Errors
    ///
    /// Returns the first failing value as `ConfigError`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let firebase = &self.firebase;
        require("firebase.apiKey", &firebase.api_key)?;
        require("firebase.authDomain", &firebase.auth_domain)?;
        require("firebase.projectId", &firebase.project_id)?;
        require("firebase.appId", &firebase.app_id)?;

        reject_placeholder("firebase.apiKey", &firebase.api_key)?;
        reject_placeholder("firebase.projectId", &firebase.project_id)?;
        reject_placeholder("firebase.appId", &firebase.app_id)?;

        if firebase.auth_domain.contains("://") || firebase.auth_domain.contains('/') {
            return Err(ConfigError::InvalidValue(
                "firebase.authDomain".to_string(),
                "must be a bare host name without scheme or path".to_string(),
            ));
        }
        require("collection", &self.collection)?;
        if self.collection.contains('/') {
            return Err(ConfigError::InvalidValue(
                "collection".to_string(),
                "must be a top-level collection name".to_string(),
            ));
        }
        Ok(())
    }
}

fn require(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingValue(name.to_string()));
    }
    Ok(())
}

fn reject_placeholder(name: &str, value: &str) -> Result<(), ConfigError> {
    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InvalidValue(
                name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
}
