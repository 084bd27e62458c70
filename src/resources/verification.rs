use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Attributes;

/// Deliverability assessment of one email address, as returned by `GET /verify`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verification(Attributes);

impl Verification {
    pub fn attributes(&self) -> &Attributes {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get_str("status")
    }

    pub fn sub_status(&self) -> Option<&str> {
        self.0.get_str("sub_status")
    }

    /// `deliverable`, `undeliverable`, `risky` or `unknown`.
    pub fn state(&self) -> Option<&str> {
        self.0.get_str("state")
    }

    pub fn reason(&self) -> Option<&str> {
        self.0.get_str("reason")
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get_str("email")
    }

    pub fn user(&self) -> Option<&str> {
        self.0.get_str("user")
    }

    pub fn domain(&self) -> Option<&str> {
        self.0.get_str("domain")
    }

    pub fn tag(&self) -> Option<&str> {
        self.0.get_str("tag")
    }

    pub fn did_you_mean(&self) -> Option<&str> {
        self.0.get_str("did_you_mean")
    }

    pub fn mx_record(&self) -> Option<&str> {
        self.0.get_str("mx_record")
    }

    pub fn smtp_provider(&self) -> Option<&str> {
        self.0.get_str("smtp_provider")
    }

    pub fn first_name(&self) -> Option<&str> {
        self.0.get_str("first_name")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.0.get_str("last_name")
    }

    pub fn full_name(&self) -> Option<&str> {
        self.0.get_str("full_name")
    }

    pub fn gender(&self) -> Option<&str> {
        self.0.get_str("gender")
    }

    /// Address belongs to a free provider such as gmail.com.
    pub fn free(&self) -> Option<bool> {
        self.0.get_bool("free")
    }

    /// Role account such as `support@` or `info@`.
    pub fn role(&self) -> Option<bool> {
        self.0.get_bool("role")
    }

    pub fn disposable(&self) -> Option<bool> {
        self.0.get_bool("disposable")
    }

    pub fn accept_all(&self) -> Option<bool> {
        self.0.get_bool("accept_all")
    }

    pub fn mailbox_full(&self) -> Option<bool> {
        self.0.get_bool("mailbox_full")
    }

    pub fn no_reply(&self) -> Option<bool> {
        self.0.get_bool("no_reply")
    }

    /// Deliverability score, 0 to 100.
    pub fn score(&self) -> Option<i64> {
        self.0.get_i64("score")
    }

    /// Seconds the server spent on the verification.
    pub fn duration(&self) -> Option<f64> {
        self.0.get_f64("duration")
    }
}
