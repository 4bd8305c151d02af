/// Split a full customer name into `(first_name, last_name)`.
///
/// Two or more tokens: the first token is the first name and the rest, joined
/// by single spaces, is the last name. A single token becomes the last name.
pub fn split_name(full_name: Option<&str>) -> (String, String) {
    let tokens: Vec<&str> = full_name.unwrap_or("").split_whitespace().collect();

    match tokens.as_slice() {
        [] => (String::new(), String::new()),
        [only] => (String::new(), only.to_string()),
        [first, rest @ ..] => (first.to_string(), rest.join(" ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_tokens() {
        assert_eq!(
            split_name(Some("Jane Doe")),
            ("Jane".to_string(), "Doe".to_string())
        );
    }

    #[test]
    fn test_single_token_is_last_name() {
        assert_eq!(
            split_name(Some("Prince")),
            (String::new(), "Prince".to_string())
        );
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(split_name(None), (String::new(), String::new()));
        assert_eq!(split_name(Some("   ")), (String::new(), String::new()));
    }

    #[test]
    fn test_extra_whitespace_collapses() {
        assert_eq!(
            split_name(Some("  Mary   Anne  van der Berg ")),
            ("Mary".to_string(), "Anne van der Berg".to_string())
        );
    }
}
