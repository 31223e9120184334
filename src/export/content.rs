//! Text helpers for the exporter: names, timestamps and code blocks

use chrono::DateTime;

use crate::error::{Error, Result};

/// Markdown code fence
pub const CODE_FENCE: &str = "```";

/// Characters removed from the JSON file name on top of path separators
const UNSAFE_FILE_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Remove path separators from a channel name so it can name a directory
pub fn sanitize_dir_name(name: &str) -> String {
    name.chars().filter(|c| !matches!(c, '/' | '\\')).collect()
}

/// Stricter variant of [`sanitize_dir_name`] for the document's file name
pub fn sanitize_file_name(name: &str) -> String {
    sanitize_dir_name(name)
        .chars()
        .filter(|c| !UNSAFE_FILE_CHARS.contains(c))
        .collect()
}

/// Format a millisecond timestamp as `YYYY-MM-DDTHH:MM:SSZ` (UTC)
pub fn format_timestamp(millis: i64) -> Result<String> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .ok_or_else(|| Error::invalid_argument(format!("Timestamp {millis} is out of range")))
}

/// Text between the first and the last code fence of a message.
///
/// Returns `None` unless the message contains at least two fences. The
/// extracted text may be empty or whitespace only.
pub fn extract_code_block(message: &str) -> Option<&str> {
    if message.matches(CODE_FENCE).count() < 2 {
        return None;
    }
    let start = message.find(CODE_FENCE)? + CODE_FENCE.len();
    // a second, non-overlapping fence exists, so end >= start
    let end = message.rfind(CODE_FENCE)?;
    Some(&message[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_dir_name() {
        assert_eq!(sanitize_dir_name("dev/ops\\team"), "devopsteam");
        assert_eq!(sanitize_dir_name("what? <now>"), "what? <now>");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("what? <now>: \"a|b\"*/"), "what now ab");
        assert_eq!(sanitize_file_name("Town Square"), "Town Square");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(1_709_251_200_123).unwrap(), "2024-03-01T00:00:00Z");
        assert_eq!(format_timestamp(0).unwrap(), "1970-01-01T00:00:00Z");
        assert!(format_timestamp(i64::MAX).is_err());
    }

    #[test]
    fn test_extract_code_block() {
        assert_eq!(extract_code_block("hello ```code``` world"), Some("code"));
    }

    #[test]
    fn test_extract_spans_first_to_last_fence() {
        let message = "```a``` and ```b```";
        assert_eq!(extract_code_block(message), Some("a``` and ```b"));
    }

    #[test]
    fn test_extract_needs_two_fences() {
        assert_eq!(extract_code_block("only ```one fence"), None);
        assert_eq!(extract_code_block("no fences"), None);
    }

    #[test]
    fn test_extract_whitespace_only() {
        assert_eq!(extract_code_block("``` ```"), Some(" "));
        assert_eq!(extract_code_block("``````"), Some(""));
    }

    #[test]
    fn test_extract_five_backticks_is_one_fence() {
        assert_eq!(extract_code_block("`````"), None);
    }
}
