//! Figma REST client. The only I/O in the crate.

use std::time::Duration;

use figma_tokens_core::FigmaFile;
use serde::Deserialize;
use tracing::{debug, error};

use crate::{config::FigmaConfig, error::FetchError, file_ref::FileRef};

/// HTTP client for the Figma files endpoint.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl FigmaClient {
    /// Builds a client from explicit settings; the token is taken as-is, so
    /// callers should check it with
    /// [`FigmaConfig::require_access_token`] first.
    pub fn new(config: &FigmaConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("figma-tokens/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.access_token.clone(),
        })
    }

    /// `GET /files/:key`.
    pub async fn fetch_file(&self, file: &FileRef) -> Result<FigmaFile, FetchError> {
        let url = format!("{}/files/{}", self.api_base, file.key);
        debug!(%url, "fetching Figma file");
        let resp = self
            .http
            .get(&url)
            .header("X-Figma-Token", &self.token)
            .send()
            .await?;
        let body = check_response(resp).await?.bytes().await?;
        let parsed = parse_file(&body)?;
        debug!(
            file_key = %file.key,
            name = parsed.name.as_deref().unwrap_or_default(),
            bytes = body.len(),
            "fetched Figma file"
        );
        Ok(parsed)
    }

    /// Like [`fetch_file`](Self::fetch_file), but a failure is logged and
    /// reported as `None`: there is simply no tree to extract from.
    pub async fn fetch_document(&self, file: &FileRef) -> Option<FigmaFile> {
        match self.fetch_file(file).await {
            Ok(fetched) => Some(fetched),
            Err(err) => {
                error!(file_key = %file.key, %err, "error fetching Figma file");
                None
            }
        }
    }
}

/// Parses a `GET /v1/files/:key` response body.
///
/// Every node level nests two JSON levels, so serde_json's default depth
/// limit would reject documents only ~64 nodes deep. The limit is lifted and
/// the stack grows on demand instead.
pub fn parse_file(body: &[u8]) -> Result<FigmaFile, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    deserializer.disable_recursion_limit();
    let file = FigmaFile::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(file)
}

#[derive(Deserialize)]
struct ApiErrorBody {
    err: String,
}

/// Maps non-success statuses to [`FetchError::Api`], preferring the `err`
/// message of Figma's JSON error body over the raw text.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map(|body| body.err)
        .unwrap_or(text);
    Err(FetchError::Api {
        status: status.as_u16(),
        message,
    })
}
