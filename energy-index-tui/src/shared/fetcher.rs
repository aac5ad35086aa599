/// Snapshot fetching from the index service
///
/// One call, one GET. Retrying is left to the next scheduled cycle.
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::error::FetchError;
use super::types::Snapshot;

/// Anything that can produce one [`Snapshot`] per call
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<Snapshot, FetchError>;
}

/// Polls the index service's JSON endpoint over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint, timeout)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Request(error.to_string())
        }
    }
}

#[async_trait]
impl SnapshotSource for HttpFetcher {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        debug!("Fetching snapshot from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.request_error(e))?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
