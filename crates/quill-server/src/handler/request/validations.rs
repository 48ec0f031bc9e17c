//! Request validation utilities.

use validator::ValidationError;

/// Rejects empty and whitespace-only text.
pub fn is_not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text() {
        assert!(is_not_blank("").is_err());
        assert!(is_not_blank(" \n\t").is_err());
        assert!(is_not_blank(" hello ").is_ok());
    }
}
