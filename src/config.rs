//! Layered configuration for talking to the Figma API.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `figma-tokens.toml` in the working directory
//! 3. The bare `FILE_ID` / `ACCESS_TOKEN` variables
//! 4. `FIGMA_*` environment variables (`FIGMA_ACCESS_TOKEN`, `FIGMA_FILE_KEY`, ...)
//!
//! Nothing else in the crate reads the environment; the loaded config is
//! handed to [`FigmaClient`](crate::client::FigmaClient) explicitly.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, file_ref::FileRef};

pub const CONFIG_FILE: &str = "figma-tokens.toml";

fn default_api_base() -> String {
    "https://api.figma.com/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FigmaConfig {
    /// Personal access token sent as `X-Figma-Token`.
    #[serde(default)]
    pub access_token: String,

    /// File to extract from, as a key or a Figma link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_key: Option<FileRef>,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Request timeout for the file fetch.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            file_key: None,
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FigmaConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Loads `.env` from the working directory (if any) before [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let local_path = PathBuf::from(CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(
                Env::raw()
                    .only(&["FILE_ID", "ACCESS_TOKEN"])
                    .map(|key| {
                        if key.as_str().eq_ignore_ascii_case("FILE_ID") {
                            "file_key".into()
                        } else {
                            "access_token".into()
                        }
                    }),
            )
            .merge(Env::prefixed("FIGMA_"))
    }

    pub fn is_configured(&self) -> bool {
        !self.access_token.is_empty() && self.file_key.is_some()
    }

    pub fn require_access_token(&self) -> Result<&str, ConfigError> {
        if self.access_token.is_empty() {
            return Err(ConfigError::NotConfigured {
                field: "access_token",
                env: "ACCESS_TOKEN",
            });
        }
        Ok(&self.access_token)
    }

    pub fn require_file_key(&self) -> Result<&FileRef, ConfigError> {
        self.file_key.as_ref().ok_or(ConfigError::NotConfigured {
            field: "file_key",
            env: "FILE_KEY",
        })
    }
}
