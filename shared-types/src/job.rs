use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::contact::Contact;
use crate::loose;

/// Body of the create-job call. Assembled from the form at submission time
/// and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JobSubmissionPayload {
    pub sold_to: SoldTo,
    pub ship_to: JobShipTo,
    pub job_details: JobDetails,
    pub billing_group: BillingGroup,
    pub alternate_contact: AlternateContact,
    pub alternate_contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SoldTo {
    pub id: String,
    pub name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JobShipTo {
    /// Identifier of the customer created (or found) in the first step
    pub id: String,
    pub name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
    pub phone1: String,
    pub phone2: String,
    pub pdf_phone1: String,
    pub pdf_phone2: String,
    pub pdf_phone3: String,
    pub pdf_phone4: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JobDetails {
    pub job_number: String,
    pub actual_job_number: String,
    pub po_number: String,
    pub description_of_works: String,
    pub dollar_value: f64,
    pub supervisor_name: String,
    pub supervisor_phone: String,
}

/// Secondary PO sub-record. Serialized as `{}` unless the job is part of a
/// billing group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillingGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_billing_group: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_value: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AlternateContact {
    pub name: String,
    pub phone: String,
    pub phone2: String,
    pub email: String,
}

impl AlternateContact {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.phone.is_empty() && self.phone2.is_empty() && self.email.is_empty()
    }
}

/// Success body of the create-job call
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct JobCreatedResponse {
    #[serde(deserialize_with = "loose::string")]
    pub job_id: Option<String>,
}
