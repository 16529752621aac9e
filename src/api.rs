//! HTTP client for the gamified devotion server

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::constants::{COMPLETE_ENDPOINT, DEVOTION_ENDPOINT, PROGRESS_ENDPOINT};
use crate::types::{CompletionResult, DevotionResponse, ProgressOverview};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct CompleteRequest<'a> {
    reflection: &'a str,
}

/// Client for the devotion endpoints. Cheap to clone; clones share the
/// underlying connection pool.
///
/// HTTP status codes are not inspected: an error-shaped body either fails
/// devotion decoding or decodes to an all-default completion result.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub async fn daily_devotion(&self) -> Result<DevotionResponse, ApiError> {
        self.get_json(DEVOTION_ENDPOINT).await
    }

    pub async fn complete_devotion(&self, reflection: &str) -> Result<CompletionResult, ApiError> {
        let url = self.endpoint(COMPLETE_ENDPOINT);
        debug!(url = %url, "POST completion");
        let body = self
            .http
            .post(&url)
            .json(&CompleteRequest { reflection })
            .send()
            .await?
            .bytes()
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn progress(&self) -> Result<ProgressOverview, ApiError> {
        self.get_json(PROGRESS_ENDPOINT).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!(url = %url, "GET");
        let body = self.http.get(&url).send().await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = ApiClient::new("http://localhost:5000");
        assert_eq!(
            client.endpoint(DEVOTION_ENDPOINT),
            "http://localhost:5000/api/gamified/daily_devotion"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = ApiClient::new("https://gabe.example.org/");
        assert_eq!(
            client.endpoint(COMPLETE_ENDPOINT),
            "https://gabe.example.org/api/gamified/complete_devotion"
        );
    }
}
