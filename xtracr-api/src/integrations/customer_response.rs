//! Create-customer response adapter
//!
//! The customer service has shipped several response shapes over time: the new
//! identifier at the top level, under `result`, or under `data`, with any of
//! three key names, and duplicates reported as a failure that embeds the
//! existing identifier. This module folds all of them into one tagged union.

use serde_json::Value;
use shared_types::loose::scalar_to_string;

/// Placeholder identifier for a created customer whose id was not returned
pub const CREATED_SENTINEL: &str = "CREATED";

const ID_KEYS: [&str; 3] = ["id", "customerId", "customerSeqNum"];
const ID_CONTAINERS: [&str; 2] = ["result", "data"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerCreation {
    /// Customer already existed; carries the existing identifier
    Duplicate(String),
    Created(String),
    /// Success without an identifier
    CreatedNoId,
    Failed(String),
}

impl CustomerCreation {
    /// Identifier to carry into the job step, if the customer now exists
    pub fn customer_id(&self) -> Option<String> {
        match self {
            CustomerCreation::Duplicate(id) | CustomerCreation::Created(id) => Some(id.clone()),
            CustomerCreation::CreatedNoId => Some(CREATED_SENTINEL.to_string()),
            CustomerCreation::Failed(_) => None,
        }
    }
}

/// Classify a 2xx create-customer body. Rules apply in order; the first match
/// wins. A body that is not JSON at all counts as an identifier-less success.
pub fn classify(body: &[u8]) -> CustomerCreation {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => classify_value(&value),
        Err(e) => {
            tracing::warn!("Create-customer response is not JSON: {}", e);
            CustomerCreation::CreatedNoId
        }
    }
}

pub fn classify_value(body: &Value) -> CustomerCreation {
    let failed = body.get("status").and_then(Value::as_str) == Some("failed");

    if failed {
        if let Some(existing) = body
            .pointer("/detail/existingCustomerId")
            .and_then(scalar_to_string)
        {
            return CustomerCreation::Duplicate(existing);
        }
    }

    if let Some(id) = find_identifier(body) {
        return CustomerCreation::Created(id);
    }

    if !failed && body.get("error").is_none() {
        return CustomerCreation::CreatedNoId;
    }

    CustomerCreation::Failed(failure_message(body))
}

fn find_identifier(body: &Value) -> Option<String> {
    let top_level = std::iter::once(body);
    let nested = ID_CONTAINERS.iter().filter_map(|key| body.get(*key));

    top_level.chain(nested).find_map(|scope| {
        ID_KEYS
            .iter()
            .find_map(|key| scope.get(*key).and_then(scalar_to_string))
    })
}

fn failure_message(body: &Value) -> String {
    body.get("result")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .unwrap_or("Unknown error")
        .to_string()
}
