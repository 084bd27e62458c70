use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Attributes;

/// Billing and credit status of the API key's account, from `GET /account`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account(Attributes);

impl Account {
    pub fn attributes(&self) -> &Attributes {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn owner_email(&self) -> Option<&str> {
        self.0.get_str("owner_email")
    }

    pub fn available_credits(&self) -> Option<i64> {
        self.0.get_i64("available_credits")
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get_str("status")
    }
}
