//! Bundle identifier helpers.

/// Replaces every character outside `[a-zA-Z0-9.-]` with `-`.
///
/// Bundle identifiers only allow alphanumerics, hyphens and periods, while
/// feature names commonly contain underscores or spaces.
pub fn to_valid_bundle_identifier(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_valid_characters() {
        assert_eq!(
            to_valid_bundle_identifier("com.example.Feature-1"),
            "com.example.Feature-1"
        );
    }

    #[test]
    fn test_replaces_invalid_characters() {
        assert_eq!(to_valid_bundle_identifier("My_Feature Name"), "My-Feature-Name");
        assert_eq!(to_valid_bundle_identifier("a+b/c"), "a-b-c");
    }

    #[test]
    fn test_non_ascii_becomes_one_hyphen_per_char() {
        assert_eq!(to_valid_bundle_identifier("Café"), "Caf-");
        assert_eq!(to_valid_bundle_identifier("홈"), "-");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(to_valid_bundle_identifier(""), "");
    }
}
