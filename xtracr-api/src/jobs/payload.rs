use shared_types::{
    AlternateContact, BillingGroup, Contact, JobDetails, JobShipTo, JobSubmissionPayload,
    NewCustomerRequest, SoldTo,
};

use super::submission::JobRequirements;
use crate::config::SessionConfig;
use crate::helpers::field_store::*;

/// Ship-to record for the create-customer call. Phones come from the hidden
/// PDF phone fields, not the editable ship-to phones.
pub fn customer_request(fields: &FieldStore, config: &SessionConfig) -> NewCustomerRequest {
    let value = |id: &str| fields.get(id).to_string();

    NewCustomerRequest {
        first_name: value(SHIP_TO_FIRST_NAME),
        last_name: value(SHIP_TO_LAST_NAME),
        address1: value(SHIP_TO_ADDRESS1),
        address2: value(SHIP_TO_ADDRESS2),
        city: value(SHIP_TO_CITY),
        state: value(SHIP_TO_STATE),
        zip_code: value(SHIP_TO_ZIP),
        county: value(SHIP_TO_COUNTY),
        phone: value(PDF_PHONE1),
        phone2: value(PDF_PHONE2),
        email: value(SHIP_TO_EMAIL),
        customer_type: config.customer_type.clone(),
        business_name: value(SHIP_TO_BUSINESS_NAME),
    }
}

pub fn job_requirements(fields: &FieldStore) -> JobRequirements<'_> {
    JobRequirements {
        sold_to_name: fields.trimmed(SOLD_TO_NAME),
        sold_to_id: fields.trimmed(SOLD_TO_ID),
        ship_to_name: fields.trimmed(SHIP_TO_NAME),
        po_number: fields.trimmed(PO_NUMBER),
        description_of_works: fields.get(DESCRIPTION_OF_WORKS),
    }
}

/// Assemble the create-job body from the current form
pub fn job_payload(
    fields: &FieldStore,
    customer_id: &str,
    contacts: &[Contact],
    config: &SessionConfig,
) -> JobSubmissionPayload {
    let value = |id: &str| fields.get(id).to_string();
    let or_country = |id: &str| {
        let country = fields.get(id);
        if country.is_empty() {
            config.default_country.clone()
        } else {
            country.to_string()
        }
    };

    let alternate_contact = AlternateContact {
        name: value(ALTERNATE_CONTACT_NAME),
        phone: value(ALTERNATE_CONTACT_PHONE),
        phone2: value(ALTERNATE_CONTACT_PHONE2),
        email: value(ALTERNATE_CONTACT_EMAIL),
    };

    let sold_to = SoldTo {
        id: fields.trimmed(SOLD_TO_ID).to_string(),
        name: fields.trimmed(SOLD_TO_NAME).to_string(),
        address1: value(SOLD_TO_ADDRESS1),
        address2: value(SOLD_TO_ADDRESS2),
        city: value(SOLD_TO_CITY),
        zip_code: value(SOLD_TO_ZIP),
        country: or_country(SOLD_TO_COUNTRY),
        phone: value(SOLD_TO_PHONE),
        email: value(SOLD_TO_EMAIL),
    };

    let ship_to = JobShipTo {
        id: customer_id.to_string(),
        name: fields.trimmed(SHIP_TO_NAME).to_string(),
        address1: value(SHIP_TO_ADDRESS1),
        address2: value(SHIP_TO_ADDRESS2),
        city: value(SHIP_TO_CITY),
        zip_code: value(SHIP_TO_ZIP),
        country: or_country(SHIP_TO_COUNTRY),
        phone1: value(SHIP_TO_PHONE1),
        phone2: value(SHIP_TO_PHONE2),
        pdf_phone1: value(PDF_PHONE1),
        pdf_phone2: value(PDF_PHONE2),
        pdf_phone3: value(PDF_PHONE3),
        pdf_phone4: value(PDF_PHONE4),
        email: value(SHIP_TO_EMAIL),
    };

    let job_details = JobDetails {
        job_number: value(SUPERVISOR_PHONE),
        actual_job_number: value(ACTUAL_JOB_NUMBER),
        po_number: fields.trimmed(PO_NUMBER).to_string(),
        description_of_works: description_with_best_contact(
            fields.get(DESCRIPTION_OF_WORKS),
            &alternate_contact,
        ),
        dollar_value: parse_amount(fields.get(DOLLAR_VALUE)),
        supervisor_name: value(SUPERVISOR_NAME),
        supervisor_phone: value(SUPERVISOR_PHONE),
    };

    JobSubmissionPayload {
        sold_to,
        ship_to,
        job_details,
        billing_group: billing_group(fields),
        alternate_contact,
        alternate_contacts: contacts.to_vec(),
    }
}

fn billing_group(fields: &FieldStore) -> BillingGroup {
    if !fields.trimmed(BILLING_GROUP_FLAG).eq_ignore_ascii_case("true") {
        return BillingGroup::default();
    }

    BillingGroup {
        is_billing_group: Some(true),
        po_suffix: Some(fields.get(SECONDARY_PO_SUFFIX).to_string()),
        second_value: Some(parse_amount(fields.get(SECOND_PO_DOLLAR_VALUE))),
    }
}

/// Append a "Best Contact" line whenever any alternate-contact field is set
fn description_with_best_contact(description: &str, contact: &AlternateContact) -> String {
    if contact.is_empty() {
        return description.to_string();
    }

    let mut line = format!("Best Contact: {} {}", contact.name, contact.phone);
    if !contact.phone2.is_empty() {
        line.push_str(&format!(", {}", contact.phone2));
    }
    if !contact.email.is_empty() {
        line.push_str(&format!(" ({})", contact.email));
    }

    format!("{}\n{}", description, line)
}

/// Currency text to a number; anything unparseable is zero
pub fn parse_amount(text: &str) -> f64 {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_store() -> FieldStore {
        let mut fields = FieldStore::new();
        fields.set(SOLD_TO_ID, "B-12");
        fields.set(SOLD_TO_NAME, " Acme Homes ");
        fields.set(SHIP_TO_NAME, "Jane Doe");
        fields.set(SHIP_TO_FIRST_NAME, "Jane");
        fields.set(SHIP_TO_LAST_NAME, "Doe");
        fields.set(SHIP_TO_PHONE1, "0249001234");
        fields.set(PDF_PHONE1, "0249001234");
        fields.set(PDF_PHONE2, "0400111222");
        fields.set(PDF_PHONE3, "0400333444");
        fields.set(PO_NUMBER, "PO-5501");
        fields.set(DOLLAR_VALUE, "1,250.50");
        fields.set(DESCRIPTION_OF_WORKS, "Restretch carpet in bedroom two");
        fields.set(SUPERVISOR_PHONE, "0411000111");
        fields
    }

    #[test]
    fn test_customer_request_uses_pdf_phones() {
        let request = customer_request(&filled_store(), &SessionConfig::default());

        assert_eq!(request.phone, "0249001234");
        assert_eq!(request.phone2, "0400111222");
        assert_eq!(request.customer_type, "INSURANCE");
        assert_eq!(request.last_name, "Doe");
    }

    #[test]
    fn test_job_payload_fields() {
        let contacts = vec![Contact::new("Site Contact", "Sam Site").with_phone("0400333444")];
        let payload = job_payload(&filled_store(), "C-900", &contacts, &SessionConfig::default());

        assert_eq!(payload.sold_to.name, "Acme Homes");
        assert_eq!(payload.sold_to.country, "Australia");
        assert_eq!(payload.ship_to.id, "C-900");
        assert_eq!(payload.ship_to.pdf_phone3, "0400333444");
        assert_eq!(payload.job_details.job_number, "0411000111");
        assert_eq!(payload.job_details.dollar_value, 1250.5);
        assert_eq!(
            payload.job_details.description_of_works,
            "Restretch carpet in bedroom two"
        );
        assert_eq!(payload.alternate_contacts, contacts);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["billing_group"], serde_json::json!({}));
    }

    #[test]
    fn test_best_contact_line_appended() {
        let mut fields = filled_store();
        fields.set(ALTERNATE_CONTACT_NAME, "Dee Maker");
        fields.set(ALTERNATE_CONTACT_PHONE, "0400555666");
        fields.set(ALTERNATE_CONTACT_PHONE2, "0400777888");
        fields.set(ALTERNATE_CONTACT_EMAIL, "dee@example.com");

        let payload = job_payload(&fields, "C-1", &[], &SessionConfig::default());

        assert_eq!(
            payload.job_details.description_of_works,
            "Restretch carpet in bedroom two\nBest Contact: Dee Maker 0400555666, 0400777888 (dee@example.com)"
        );
    }

    #[test]
    fn test_billing_group_only_when_flagged() {
        let mut fields = filled_store();
        fields.set(SECONDARY_PO_SUFFIX, "B");
        assert_eq!(
            serde_json::to_value(job_payload(&fields, "C-1", &[], &SessionConfig::default()).billing_group)
                .unwrap(),
            serde_json::json!({})
        );

        fields.set(BILLING_GROUP_FLAG, "true");
        fields.set(SECOND_PO_DOLLAR_VALUE, "300");
        let billing = job_payload(&fields, "C-1", &[], &SessionConfig::default()).billing_group;
        assert_eq!(billing.is_billing_group, Some(true));
        assert_eq!(billing.po_suffix.as_deref(), Some("B"));
        assert_eq!(billing.second_value, Some(300.0));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(" $1,200 "), 1200.0);
        assert_eq!(parse_amount("99.95"), 99.95);
    }
}
