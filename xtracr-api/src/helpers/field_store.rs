use std::collections::BTreeMap;

// Sold-to (builder)
pub const SOLD_TO_ID: &str = "sold-to-rfms-id";
pub const SOLD_TO_NAME: &str = "sold-to-name";
pub const SOLD_TO_BUSINESS_NAME: &str = "sold-to-business-name";
pub const SOLD_TO_ADDRESS1: &str = "sold-to-address1";
pub const SOLD_TO_ADDRESS2: &str = "sold-to-address2";
pub const SOLD_TO_CITY: &str = "sold-to-city";
pub const SOLD_TO_STATE: &str = "sold-to-state";
pub const SOLD_TO_ZIP: &str = "sold-to-zip";
pub const SOLD_TO_COUNTRY: &str = "sold-to-country";
pub const SOLD_TO_PHONE: &str = "sold-to-phone";
pub const SOLD_TO_PHONE1: &str = "sold-to-phone1";
pub const SOLD_TO_PHONE2: &str = "sold-to-phone2";
pub const SOLD_TO_EMAIL: &str = "sold-to-email";
pub const SOLD_TO_SALESPERSON: &str = "sold-to-salesperson";

// Ship-to (end customer)
pub const SHIP_TO_NAME: &str = "ship-to-name";
pub const SHIP_TO_FIRST_NAME: &str = "ship-to-first-name";
pub const SHIP_TO_LAST_NAME: &str = "ship-to-last-name";
pub const SHIP_TO_BUSINESS_NAME: &str = "ship-to-business-name";
pub const SHIP_TO_ADDRESS1: &str = "ship-to-address1";
pub const SHIP_TO_ADDRESS2: &str = "ship-to-address2";
pub const SHIP_TO_CITY: &str = "ship-to-city";
pub const SHIP_TO_STATE: &str = "ship-to-state";
pub const SHIP_TO_ZIP: &str = "ship-to-zip";
pub const SHIP_TO_COUNTY: &str = "ship-to-county";
pub const SHIP_TO_COUNTRY: &str = "ship-to-country";
pub const SHIP_TO_EMAIL: &str = "ship-to-email";
pub const SHIP_TO_PHONE1: &str = "ship-to-phone1";
pub const SHIP_TO_PHONE2: &str = "ship-to-phone2";

// Hidden phone slots as extracted from the PDF
pub const PDF_PHONE1: &str = "pdf-phone1";
pub const PDF_PHONE2: &str = "pdf-phone2";
pub const PDF_PHONE3: &str = "pdf_phone3";
pub const PDF_PHONE4: &str = "pdf_phone4";

// Work order
pub const PO_NUMBER: &str = "po-number";
pub const DOLLAR_VALUE: &str = "dollar-value";
pub const DESCRIPTION_OF_WORKS: &str = "description-of-works";
pub const COMMENCEMENT_DATE: &str = "commencement-date";
pub const COMPLETION_DATE: &str = "completion-date";
pub const SUPERVISOR_NAME: &str = "supervisor-name";
pub const SUPERVISOR_PHONE: &str = "supervisor-phone";
pub const ACTUAL_JOB_NUMBER: &str = "actual-job-number";

// Best contact
pub const ALTERNATE_CONTACT_NAME: &str = "alternate-contact-name";
pub const ALTERNATE_CONTACT_PHONE: &str = "alternate-contact-phone";
pub const ALTERNATE_CONTACT_PHONE2: &str = "alternate-contact-phone2";
pub const ALTERNATE_CONTACT_EMAIL: &str = "alternate-contact-email";
pub const PRIMARY_CONTACT_NAME: &str = "primary-contact-name";

// Billing group
pub const BILLING_GROUP_FLAG: &str = "billing-group-checkbox";
pub const SECONDARY_PO_SUFFIX: &str = "secondary-po-suffix";
pub const SECOND_PO_DOLLAR_VALUE: &str = "second-po-dollar-value";

pub const SOLD_TO_FIELDS: &[&str] = &[
    SOLD_TO_ID,
    SOLD_TO_NAME,
    SOLD_TO_BUSINESS_NAME,
    SOLD_TO_ADDRESS1,
    SOLD_TO_ADDRESS2,
    SOLD_TO_CITY,
    SOLD_TO_STATE,
    SOLD_TO_ZIP,
    SOLD_TO_COUNTRY,
    SOLD_TO_PHONE,
    SOLD_TO_PHONE1,
    SOLD_TO_PHONE2,
    SOLD_TO_EMAIL,
    SOLD_TO_SALESPERSON,
];

pub const SHIP_TO_FIELDS: &[&str] = &[
    SHIP_TO_NAME,
    SHIP_TO_FIRST_NAME,
    SHIP_TO_LAST_NAME,
    SHIP_TO_BUSINESS_NAME,
    SHIP_TO_ADDRESS1,
    SHIP_TO_ADDRESS2,
    SHIP_TO_CITY,
    SHIP_TO_STATE,
    SHIP_TO_ZIP,
    SHIP_TO_COUNTY,
    SHIP_TO_COUNTRY,
    SHIP_TO_EMAIL,
    SHIP_TO_PHONE1,
    SHIP_TO_PHONE2,
    PDF_PHONE1,
    PDF_PHONE2,
    PDF_PHONE3,
    PDF_PHONE4,
];

pub const WORK_ORDER_FIELDS: &[&str] = &[
    PO_NUMBER,
    DOLLAR_VALUE,
    DESCRIPTION_OF_WORKS,
    COMMENCEMENT_DATE,
    COMPLETION_DATE,
    SUPERVISOR_NAME,
    SUPERVISOR_PHONE,
    ACTUAL_JOB_NUMBER,
];

pub const BEST_CONTACT_FIELDS: &[&str] = &[
    ALTERNATE_CONTACT_NAME,
    ALTERNATE_CONTACT_PHONE,
    ALTERNATE_CONTACT_PHONE2,
    ALTERNATE_CONTACT_EMAIL,
    PRIMARY_CONTACT_NAME,
];

pub const BILLING_FIELDS: &[&str] = &[BILLING_GROUP_FLAG, SECONDARY_PO_SUFFIX, SECOND_PO_DOLLAR_VALUE];

/// Current value of every form field, keyed by field id.
///
/// Only ids the form actually has are accepted; writing any other id is
/// logged and ignored so a stale UI can never crash a command.
#[derive(Debug, Clone)]
pub struct FieldStore {
    values: BTreeMap<String, String>,
}

impl Default for FieldStore {
    fn default() -> Self {
        let values = [
            SOLD_TO_FIELDS,
            SHIP_TO_FIELDS,
            WORK_ORDER_FIELDS,
            BEST_CONTACT_FIELDS,
            BILLING_FIELDS,
        ]
        .iter()
        .flat_map(|group| group.iter())
        .map(|id| (id.to_string(), String::new()))
        .collect();

        Self { values }
    }
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the field exists
    pub fn set(&mut self, field_id: &str, value: impl Into<String>) -> bool {
        match self.values.get_mut(field_id) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => {
                tracing::warn!(field_id, "Ignoring write to unknown form field");
                false
            }
        }
    }

    /// Value of a field; unknown fields read as empty
    pub fn get(&self, field_id: &str) -> &str {
        self.values.get(field_id).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value of a field
    pub fn trimmed(&self, field_id: &str) -> &str {
        self.get(field_id).trim()
    }

    pub fn clear(&mut self, field_ids: &[&str]) {
        for id in field_ids {
            self.set(id, String::new());
        }
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_fields_start_empty() {
        let store = FieldStore::new();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.get(SOLD_TO_NAME).map(String::as_str), Some(""));
        assert_eq!(snapshot.get(PDF_PHONE4).map(String::as_str), Some(""));
        assert_eq!(store.get(PO_NUMBER), "");
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut store = FieldStore::new();
        assert!(!store.set("ship-to-fax", "0299999999"));
        assert!(!store.snapshot().contains_key("ship-to-fax"));
        assert_eq!(store.get("ship-to-fax"), "");
    }

    #[test]
    fn test_set_and_clear() {
        let mut store = FieldStore::new();
        assert!(store.set(PO_NUMBER, " PO-17 "));
        assert_eq!(store.trimmed(PO_NUMBER), "PO-17");

        store.clear(WORK_ORDER_FIELDS);
        assert_eq!(store.get(PO_NUMBER), "");
    }
}
