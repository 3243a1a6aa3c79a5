use serde_json::Value;

use crate::client::ClientError;
use crate::models::OperationOutcome;

/// Render an outcome the way the backend sent it: pretty-printed JSON with
/// no field dropped, renamed, or reordered in meaning. A backend-reported
/// failure gets its reason on the first line, payload still verbatim below.
pub fn render(outcome: &OperationOutcome) -> String {
    match outcome {
        OperationOutcome::Success(payload) => pretty(payload),
        OperationOutcome::Failure { reason, payload } => {
            format!("backend failure: {reason}\n{}", pretty(payload))
        }
    }
}

/// Render a transport failure with its full cause chain.
pub fn render_error(error: &ClientError) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn pretty(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}
