use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Canonical ship-to and contact fields derived from one extraction.
///
/// All values default to the empty string; a form never shows a placeholder
/// token for a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReconciledFields {
    pub ship_to_name: String,
    pub ship_to_first_name: String,
    pub ship_to_last_name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub email: String,
    /// Primary phone
    pub phone_slot_1: String,
    /// Mobile, or work phone when the mobile is missing or repeats slot 1
    pub phone_slot_2: String,
    /// Alternate-contact / extra phones; slots 3 and 4 never hold the same number
    pub phone_slot_3: String,
    pub phone_slot_4: String,
    pub best_contact_summary: String,
    pub best_contact_email: String,
    /// Highest-ranked contact name, for places that need a single person
    pub primary_contact_name: String,
}

/// Work-order details carried straight from the extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WorkOrderFields {
    pub po_number: String,
    pub dollar_value: String,
    pub description_of_works: String,
    pub supervisor_name: String,
    pub supervisor_phone: String,
    pub commencement_date: String,
    pub completion_date: String,
    pub actual_job_number: String,
}
