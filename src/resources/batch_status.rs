use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Attributes, Verification};

/// Progress and results of a batch verification, from `GET /batch`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchStatus(Attributes);

impl BatchStatus {
    pub fn attributes(&self) -> &Attributes {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get_str("id")
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get_str("message")
    }

    /// Number of emails verified so far.
    pub fn processed(&self) -> Option<i64> {
        self.0.get_i64("processed")
    }

    pub fn total(&self) -> Option<i64> {
        self.0.get_i64("total")
    }

    /// True once every email in the batch has a result.
    pub fn is_complete(&self) -> bool {
        match (self.processed(), self.total()) {
            (Some(processed), Some(total)) => processed >= total,
            _ => false,
        }
    }

    /// Results available so far. Entries that are not JSON objects are skipped.
    pub fn emails(&self) -> Vec<Verification> {
        self.0
            .get("emails")
            .and_then(Value::as_array)
            .map(|emails| {
                emails
                    .iter()
                    .filter_map(|email| serde_json::from_value(email.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}
