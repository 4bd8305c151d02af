use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::contact::Contact;
use crate::loose;

/// Structured fields returned by the PDF extraction service for one upload.
///
/// Every field is optional on the wire. The service has been observed to send
/// empty strings, nulls and numbers interchangeably, so scalar fields are
/// decoded loosely and empty values collapse to `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ExtractionResult {
    #[serde(deserialize_with = "loose::string")]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub address: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub address1: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub address2: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub city: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub country: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub email: Option<String>,

    #[serde(deserialize_with = "loose::string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub mobile: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub home_phone: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub work_phone: Option<String>,

    #[serde(deserialize_with = "loose::string")]
    pub po_number: Option<String>,
    #[serde(deserialize_with = "loose::number")]
    pub dollar_value: Option<f64>,
    #[serde(deserialize_with = "loose::string")]
    pub scope_of_work: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub description_of_works: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub actual_job_number: Option<String>,

    #[serde(deserialize_with = "loose::string")]
    pub supervisor_name: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub supervisor_mobile: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub supervisor_phone: Option<String>,

    #[serde(deserialize_with = "loose::string")]
    pub commencement_date: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub installation_date: Option<String>,
    #[serde(deserialize_with = "loose::string")]
    pub completion_date: Option<String>,

    #[serde(deserialize_with = "loose::list")]
    pub alternate_contacts: Vec<Contact>,
    #[serde(deserialize_with = "loose::string_list")]
    pub extra_phones: Vec<String>,
    #[serde(deserialize_with = "loose::string")]
    pub builder_mismatch_warning: Option<String>,

    /// Set by the service instead of the fields above when extraction failed
    /// but the HTTP exchange itself succeeded.
    #[serde(deserialize_with = "loose::string")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_service_payload() {
        let json = r#"{
            "customer_name": "Jane Doe",
            "address1": "12 Example St",
            "phone": "0400111222",
            "mobile": "",
            "dollar_value": 1250.5,
            "po_number": 40012,
            "extra_phones": ["0400333444", "", null],
            "alternate_contacts": [
                {"type": "Site Contact", "name": "Sam", "phone": "0400555666", "email": null}
            ],
            "raw_text": "ignored"
        }"#;

        let result: ExtractionResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.customer_name.as_deref(), Some("Jane Doe"));
        assert_eq!(result.mobile, None);
        assert_eq!(result.dollar_value, Some(1250.5));
        assert_eq!(result.po_number.as_deref(), Some("40012"));
        assert_eq!(result.extra_phones, vec!["0400333444".to_string()]);
        assert_eq!(result.alternate_contacts.len(), 1);
        assert_eq!(result.alternate_contacts[0].contact_type, "Site Contact");
        assert!(result.builder_mismatch_warning.is_none());
    }

    #[test]
    fn test_decode_error_body() {
        let result: ExtractionResult =
            serde_json::from_str(r#"{"error": "Could not read PDF"}"#).unwrap();
        assert_eq!(result.error.as_deref(), Some("Could not read PDF"));
    }

    #[test]
    fn test_dollar_value_from_string() {
        let result: ExtractionResult =
            serde_json::from_str(r#"{"dollar_value": "1,200.00"}"#).unwrap();
        assert_eq!(result.dollar_value, Some(1200.0));
    }
}
