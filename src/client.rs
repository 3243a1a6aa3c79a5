use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::models::{AskRequest, CrawlRequest, IndexRequest, OperationOutcome};

/// A failed exchange, as opposed to a backend-reported failure which still
/// decodes into an [`OperationOutcome`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
    #[error("transport failure during {operation}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not decode {operation} response as JSON")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Issues the three pipeline operations against a configured backend.
/// One POST per invocation, no retries, no caching, no shared state beyond
/// reqwest's own connection pool.
pub struct PipelineClient {
    http: Client,
    config: Config,
}

impl PipelineClient {
    pub fn new(config: Config) -> Result<PipelineClient, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Build)?;
        Ok(PipelineClient { http, config })
    }

    pub async fn crawl(&self, request: &CrawlRequest) -> Result<OperationOutcome, ClientError> {
        self.post("crawl", request).await
    }

    pub async fn index(&self, request: &IndexRequest) -> Result<OperationOutcome, ClientError> {
        self.post("index", request).await
    }

    pub async fn ask(&self, request: &AskRequest) -> Result<OperationOutcome, ClientError> {
        self.post("ask", request).await
    }

    /// POST the JSON-encoded body to the operation's route and decode
    /// whatever JSON comes back, success or not. The client never branches
    /// on the HTTP status; classification reads the payload itself.
    async fn post<T>(
        &self,
        operation: &'static str,
        body: &T,
    ) -> Result<OperationOutcome, ClientError>
    where
        T: Serialize + ?Sized,
    {
        let url = self.config.endpoint(operation);
        tracing::info!("POST {url}");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Transport { operation, source })?;
        let payload = response
            .json()
            .await
            .map_err(|source| ClientError::Decode { operation, source })?;
        Ok(OperationOutcome::classify(payload))
    }
}
