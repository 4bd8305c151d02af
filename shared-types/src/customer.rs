use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::loose;

/// Request body for the customer search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerSearchRequest {
    pub term: String,
}

/// One customer as returned by the search endpoint.
///
/// Used to pick the sold-to (builder) entity before an upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct CustomerRecord {
    #[serde(deserialize_with = "loose::string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub customer_source_id: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub business_name: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub address1: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub address2: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub city: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub phone2: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub email: Option<String>,
}

impl CustomerRecord {
    /// Identifier, preferring `id` over the source-system id
    pub fn identifier(&self) -> String {
        self.id
            .clone()
            .or_else(|| self.customer_source_id.clone())
            .unwrap_or_default()
    }

    /// Name as it should appear in the sold-to name field
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// Label for a search result row
    pub fn result_label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.business_name.clone())
            .unwrap_or_else(|| self.display_name())
    }
}

/// A search hit with the label the result list shows for it. The UI sends
/// `customer` back unchanged when the operator picks the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerSearchResult {
    pub label: String,
    pub customer: CustomerRecord,
}

impl From<CustomerRecord> for CustomerSearchResult {
    fn from(customer: CustomerRecord) -> Self {
        Self {
            label: customer.result_label(),
            customer,
        }
    }
}

/// Ship-to record sent to the create-customer endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub county: String,
    pub phone: String,
    pub phone2: String,
    pub email: String,
    pub customer_type: String,
    pub business_name: String,
}
