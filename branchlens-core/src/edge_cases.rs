//! The edge-case submission endpoint contract.
//!
//! Submissions are the one boundary meant to reach a real service
//! eventually: `POST` with a JSON body `{"changeId": ..., "edgeCases": ...}`.
//! [`handle_post`] implements the endpoint's status/body behaviour without
//! any transport so the mock backend and tests can share it.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_SERVER_ERROR: u16 = 500;

const MISSING_FIELDS: &str = "Missing required fields: changeId and edgeCases";
const RECEIVED: &str = "Edge cases received successfully";
const PROCESSING_FAILED: &str = "Failed to process edge cases";

/// Request body as sent by a client. Both fields are optional on the wire
/// so that their absence maps to `400`, not to a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeCaseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_cases: Option<String>,
}

impl EdgeCaseRequest {
    pub fn new(change_id: &str, edge_cases: &str) -> Self {
        Self {
            change_id: Some(change_id.to_owned()),
            edge_cases: Some(edge_cases.to_owned()),
        }
    }
}

/// HTTP-shaped response: status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeCaseResponse {
    pub status: u16,
    pub body: Value,
}

impl EdgeCaseResponse {
    fn error(status: u16, message: &str) -> Self {
        Self { status, body: json!({ "error": message }) }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// The `message` field of a success body, or the `error` field otherwise.
    pub fn message(&self) -> Option<&str> {
        let key = if self.is_success() { "message" } else { "error" };
        self.body.get(key).and_then(Value::as_str)
    }
}

/// Handles a raw `POST` body.
///
/// - malformed JSON → `500` `{error}`
/// - missing or blank `changeId` / `edgeCases` → `400` `{error}`
/// - otherwise → `200` `{success: true, message, changeId}`
///
/// Nothing is stored; accepted submissions are only logged.
pub fn handle_post(raw_body: &str) -> EdgeCaseResponse {
    let request: EdgeCaseRequest = match serde_json::from_str(raw_body) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "failed to process edge-case body");
            return EdgeCaseResponse::error(STATUS_SERVER_ERROR, PROCESSING_FAILED);
        }
    };

    let change_id = request.change_id.as_deref().filter(|s| !s.trim().is_empty());
    let edge_cases = request.edge_cases.as_deref().filter(|s| !s.trim().is_empty());
    let (Some(change_id), Some(edge_cases)) = (change_id, edge_cases) else {
        return EdgeCaseResponse::error(STATUS_BAD_REQUEST, MISSING_FIELDS);
    };

    tracing::info!(change_id, edge_cases, "received edge cases");
    EdgeCaseResponse {
        status: STATUS_OK,
        body: json!({
            "success": true,
            "message": RECEIVED,
            "changeId": change_id,
        }),
    }
}
