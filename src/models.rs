use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload for the crawl stage. Zero or negative limits are sent as-is;
/// enforcing floors is the backend's job.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CrawlRequest {
    pub start_url: String,
    pub max_pages: i64,
    pub max_depth: i64,
    pub crawl_delay_ms: f64,
}

/// Payload for the index stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IndexRequest {
    pub chunk_size: i64,
    pub chunk_overlap: i64,
    pub embedding_model: String,
}

/// Payload for the ask stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AskRequest {
    pub question: String,
    pub top_k: i64,
}

/// Outcome of one backend exchange. The raw payload is kept verbatim in both
/// variants; classification only reads the backend's own failure indicators.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutcome {
    Success(Value),
    Failure { reason: String, payload: Value },
}

impl OperationOutcome {
    /// Classify a decoded backend payload. The backend signals failure three
    /// ways: a `detail` field (the framework's error envelope), a top-level
    /// `error` string, or a non-empty `errors` array (the index stage).
    pub fn classify(payload: Value) -> OperationOutcome {
        if let Some(detail) = payload.get("detail") {
            let reason = match detail.as_str() {
                Some(s) => s.to_string(),
                None => detail.to_string(),
            };
            return OperationOutcome::Failure { reason, payload };
        }
        if let Some(error) = payload.get("error").and_then(Value::as_str) {
            let reason = error.to_string();
            return OperationOutcome::Failure { reason, payload };
        }
        if let Some(errors) = payload.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let reason = errors
                    .iter()
                    .map(|e| match e.as_str() {
                        Some(s) => s.to_string(),
                        None => e.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                return OperationOutcome::Failure { reason, payload };
            }
        }
        OperationOutcome::Success(payload)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationOutcome::Success(_))
    }

    /// The verbatim backend payload, whichever way it was classified.
    pub fn payload(&self) -> &Value {
        match self {
            OperationOutcome::Success(payload) => payload,
            OperationOutcome::Failure { payload, .. } => payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_plain_payload_as_success() {
        let payload = json!({"page_count": 12, "skipped_count": 1, "urls": []});
        let outcome = OperationOutcome::classify(payload.clone());
        assert_eq!(outcome, OperationOutcome::Success(payload));
    }

    #[test]
    fn classify_empty_errors_array_as_success() {
        let payload = json!({"vector_count": 42, "errors": []});
        assert!(OperationOutcome::classify(payload).is_success());
    }

    #[test]
    fn classify_nonempty_errors_array_as_failure() {
        let payload = json!({"vector_count": 0, "errors": ["Model load failed: boom"]});
        let outcome = OperationOutcome::classify(payload.clone());
        match outcome {
            OperationOutcome::Failure { reason, payload: kept } => {
                assert_eq!(reason, "Model load failed: boom");
                assert_eq!(kept, payload);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn classify_detail_envelope_as_failure() {
        let payload = json!({"detail": "Not Found"});
        let outcome = OperationOutcome::classify(payload);
        assert!(!outcome.is_success());
    }
}
