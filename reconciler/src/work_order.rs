use shared_types::{ExtractionResult, WorkOrderFields};

use crate::dates::normalize_date;

/// Copy the purchase-order details out of an extraction, applying the field
/// fallbacks the extraction service is known to need.
pub fn work_order_fields(extraction: &ExtractionResult) -> WorkOrderFields {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    WorkOrderFields {
        po_number: text(&extraction.po_number),
        dollar_value: format_dollar_value(extraction.dollar_value),
        description_of_works: extraction
            .scope_of_work
            .clone()
            .or_else(|| extraction.description_of_works.clone())
            .unwrap_or_default(),
        supervisor_name: text(&extraction.supervisor_name),
        supervisor_phone: extraction
            .supervisor_mobile
            .clone()
            .or_else(|| extraction.supervisor_phone.clone())
            .unwrap_or_default(),
        commencement_date: normalize_date(extraction.commencement_date.as_deref().unwrap_or("")),
        completion_date: normalize_date(
            extraction
                .installation_date
                .as_deref()
                .or(extraction.completion_date.as_deref())
                .unwrap_or(""),
        ),
        actual_job_number: text(&extraction.actual_job_number),
    }
}

/// A zero or missing amount leaves the field empty
fn format_dollar_value(value: Option<f64>) -> String {
    match value {
        Some(amount) if amount != 0.0 => {
            if amount.fract() == 0.0 {
                format!("{:.0}", amount)
            } else {
                format!("{:.2}", amount)
            }
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks() {
        let extraction = ExtractionResult {
            description_of_works: Some("Replace carpet in bedroom two".to_string()),
            supervisor_phone: Some("0411000111".to_string()),
            completion_date: Some("14/02/2025".to_string()),
            ..Default::default()
        };

        let fields = work_order_fields(&extraction);
        assert_eq!(fields.description_of_works, "Replace carpet in bedroom two");
        assert_eq!(fields.supervisor_phone, "0411000111");
        assert_eq!(fields.completion_date, "2025-02-14");
        assert_eq!(fields.po_number, "");
    }

    #[test]
    fn test_scope_of_work_preferred() {
        let extraction = ExtractionResult {
            scope_of_work: Some("Lay vinyl plank".to_string()),
            description_of_works: Some("ignored".to_string()),
            supervisor_mobile: Some("0400000001".to_string()),
            supervisor_phone: Some("0290000000".to_string()),
            ..Default::default()
        };

        let fields = work_order_fields(&extraction);
        assert_eq!(fields.description_of_works, "Lay vinyl plank");
        assert_eq!(fields.supervisor_phone, "0400000001");
    }

    #[test]
    fn test_dollar_value_rendering() {
        assert_eq!(format_dollar_value(None), "");
        assert_eq!(format_dollar_value(Some(0.0)), "");
        assert_eq!(format_dollar_value(Some(1200.0)), "1200");
        assert_eq!(format_dollar_value(Some(1250.5)), "1250.50");
    }
}
