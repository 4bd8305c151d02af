use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::loose;

/// A named person found on a work order, e.g. a "Decision Maker" or
/// "Site Contact". Only exists as a member of an extraction result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "loose::string_or_empty")]
    pub name: String,
    /// Free-text category as printed on the document
    #[serde(rename = "type", deserialize_with = "loose::string_or_empty")]
    pub contact_type: String,
    #[serde(deserialize_with = "loose::string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub email: Option<String>,
}

impl Contact {
    pub fn new(contact_type: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            contact_type: contact_type.to_string(),
            phone: None,
            email: None,
        }
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }
}
