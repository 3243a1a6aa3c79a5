//! Client-side orchestration for a crawl -> index -> ask RAG service.
//!
//! The backend (crawler, embedder, vector store, LLM) is a remote HTTP
//! service; this crate owns the request contract, the exchange, and the
//! stage-ordering rules between the three operations.

pub mod client;
pub mod config;
pub mod models;
pub mod params;
pub mod pipeline;
pub mod report;
