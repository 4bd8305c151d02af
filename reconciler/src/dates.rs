use chrono::NaiveDate;

// Two-digit years are tried first; `%Y` would otherwise accept "25" as year 25.
const INPUT_FORMATS: [&str; 6] = [
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y-%m-%d",
];

/// Normalize a printed work-order date to `YYYY-MM-DD` for date inputs.
///
/// Day-first formats are assumed. Text that does not parse is passed through
/// trimmed so the operator can still correct it by hand.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_first() {
        assert_eq!(normalize_date("03/04/2025"), "2025-04-03");
        assert_eq!(normalize_date("3-4-2025"), "2025-04-03");
        assert_eq!(normalize_date("03/04/25"), "2025-04-03");
    }

    #[test]
    fn test_iso_passthrough() {
        assert_eq!(normalize_date("2025-11-30"), "2025-11-30");
    }

    #[test]
    fn test_unparseable_kept() {
        assert_eq!(normalize_date(" ASAP "), "ASAP");
        assert_eq!(normalize_date(""), "");
    }
}
