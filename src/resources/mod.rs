//! Value objects wrapping decoded API responses.
//!
//! Each type keeps the JSON object exactly as the server sent it and exposes
//! typed accessors for the fields it knows about. Unknown or mistyped fields
//! read as `None`; [`Attributes::get`] gives access to anything else.

mod account;
mod batch_status;
mod verification;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use account::Account;
pub use batch_status::BatchStatus;
pub use verification::Verification;

/// A decoded JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    /// Returns the raw value of a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}
