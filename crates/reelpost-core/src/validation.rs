//! Naming rules shared by configuration and the document store.

/// Longest accepted collection name or document id.
pub const MAX_SEGMENT_LENGTH: usize = 256;

/// Whether `value` can be used as a collection name or document id.
///
/// Both end up as path segments in the file backend, so the rule is the same everywhere:
/// 1-256 characters of `[A-Za-z0-9._-]`, never `.` and never containing `..`.
pub fn is_valid_segment(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_SEGMENT_LENGTH
        && value != "."
        && !value.contains("..")
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_rules() {
        assert!(is_valid_segment("posts"));
        assert!(is_valid_segment("6f1c5a34-8a55-4b8f-9a49-1f0f6c9d2b11"));
        assert!(!is_valid_segment(""));
        assert!(!is_valid_segment("."));
        assert!(!is_valid_segment("a..b"));
        assert!(!is_valid_segment("my posts"));
        assert!(!is_valid_segment("a/b"));
        assert!(!is_valid_segment(&"x".repeat(MAX_SEGMENT_LENGTH + 1)));
    }
}
