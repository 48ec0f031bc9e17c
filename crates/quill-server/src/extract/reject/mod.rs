//! Request extractors with uniform error responses.
//!
//! Each extractor wraps its axum counterpart and converts the rejection into
//! a [`handler::Error`], so malformed input is reported like every other
//! client error.
//!
//! [`handler::Error`]: crate::handler::Error

mod enhanced_json;
mod enhanced_path;
mod enhanced_query;
mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_path::Path;
pub use self::enhanced_query::Query;
pub use self::validated_json::ValidateJson;

/// Keeps the first lines of a rejection message for logging.
fn sanitize_error_message(message: &str, max_lines: usize, max_chars: usize) -> String {
    message
        .lines()
        .take(max_lines)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_truncates() {
        assert_eq!(sanitize_error_message("a\nb\nc", 2, 100), "a b");
        assert_eq!(sanitize_error_message("abcdef", 3, 4), "abcd");
    }
}
