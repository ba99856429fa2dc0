//! Error types for configuration, file references and the Figma API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A setting needed for the requested operation has no value.
    #[error("'{field}' is not configured (set FIGMA_{env} or add it to figma-tokens.toml)")]
    NotConfigured {
        field: &'static str,
        env: &'static str,
    },
}

#[derive(Debug, Error)]
#[error("invalid Figma file reference `{input}`: {reason}")]
pub struct FileRefError {
    pub input: String,
    pub reason: String,
}

/// Errors that can occur when fetching a file from the Figma REST API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by Figma.
        status: u16,
        /// `err` field of the error body, or the raw body.
        message: String,
    },

    /// The response body was not a Figma file document.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
