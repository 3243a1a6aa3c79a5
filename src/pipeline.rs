use crate::client::{ClientError, PipelineClient};
use crate::models::{AskRequest, CrawlRequest, IndexRequest, OperationOutcome};

/// Proof that a crawl reported success. Required to index.
///
/// Receipts carry no identity and nothing crosses the wire; they only make
/// the crawl -> index -> ask ordering a compile-checked contract instead of
/// a doc comment.
#[derive(Debug, Clone, Copy)]
pub struct CrawlReceipt(());

/// Proof that an index build reported success. Required to ask.
#[derive(Debug, Clone, Copy)]
pub struct IndexReceipt(());

/// Stage-ordered wrapper around [`PipelineClient`]. Callers that want the
/// original unchecked behavior can use the client directly.
pub struct Pipeline {
    client: PipelineClient,
}

impl Pipeline {
    pub fn new(client: PipelineClient) -> Pipeline {
        Pipeline { client }
    }

    pub fn client(&self) -> &PipelineClient {
        &self.client
    }

    /// Run the crawl stage. A receipt is issued only when the backend
    /// reported success; a backend failure still returns its outcome.
    pub async fn crawl(
        &self,
        request: &CrawlRequest,
    ) -> Result<(Option<CrawlReceipt>, OperationOutcome), ClientError> {
        let outcome = self.client.crawl(request).await?;
        let receipt = outcome.is_success().then_some(CrawlReceipt(()));
        Ok((receipt, outcome))
    }

    /// Run the index stage over previously crawled content.
    pub async fn index(
        &self,
        _crawled: &CrawlReceipt,
        request: &IndexRequest,
    ) -> Result<(Option<IndexReceipt>, OperationOutcome), ClientError> {
        let outcome = self.client.index(request).await?;
        let receipt = outcome.is_success().then_some(IndexReceipt(()));
        Ok((receipt, outcome))
    }

    /// Ask a question against a previously built index.
    pub async fn ask(
        &self,
        _indexed: &IndexReceipt,
        request: &AskRequest,
    ) -> Result<OperationOutcome, ClientError> {
        self.client.ask(request).await
    }
}
