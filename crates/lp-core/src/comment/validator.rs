//! Comment content policy

use crate::error::{LunchPickerError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum comment length (default)
pub const MAX_COMMENT_LENGTH: usize = 200;

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(https?://|www\.)\S+").expect("link pattern is a valid regex")
});

/// Whether the text contains something that looks like a link
pub fn contains_link(content: &str) -> bool {
    LINK_PATTERN.is_match(content)
}

/// Validator for comment submissions
#[derive(Debug, Clone)]
pub struct CommentValidator {
    max_length: usize,
}

impl CommentValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_length: MAX_COMMENT_LENGTH,
        }
    }

    /// Create a new validator with custom max length
    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Validate comment content.
    ///
    /// Length counts UTF-16 code units, so characters outside the BMP
    /// count twice.
    pub fn validate_content(&self, content: &str) -> Result<()> {
        if content.is_empty() {
            return Err(LunchPickerError::MissingField("content"));
        }

        let length = content.encode_utf16().count();
        if length > self.max_length {
            return Err(LunchPickerError::ContentTooLong {
                max: self.max_length,
                actual: length,
            });
        }

        if contains_link(content) {
            return Err(LunchPickerError::LinkNotAllowed);
        }

        Ok(())
    }

    /// Validate a complete submission: required fields first, then content
    pub fn validate(&self, place_id: &str, nickname: &str, content: &str) -> Result<()> {
        if place_id.is_empty() {
            return Err(LunchPickerError::MissingField("place_id"));
        }
        if nickname.is_empty() {
            return Err(LunchPickerError::MissingField("nickname"));
        }
        self.validate_content(content)
    }
}

impl Default for CommentValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_content_valid() {
        let validator = CommentValidator::new();
        assert!(validator.validate_content("점심 맛집 인정").is_ok());
    }

    #[test]
    fn test_missing_fields() {
        let validator = CommentValidator::new();
        assert!(matches!(
            validator.validate("", "nick", "hi"),
            Err(LunchPickerError::MissingField("place_id"))
        ));
        assert!(matches!(
            validator.validate("p1", "", "hi"),
            Err(LunchPickerError::MissingField("nickname"))
        ));
        assert!(matches!(
            validator.validate("p1", "nick", ""),
            Err(LunchPickerError::MissingField("content"))
        ));
    }

    #[test]
    fn test_length_boundary() {
        let validator = CommentValidator::new();
        assert!(validator.validate_content(&"a".repeat(200)).is_ok());
        assert!(matches!(
            validator.validate_content(&"a".repeat(201)),
            Err(LunchPickerError::ContentTooLong { max: 200, actual: 201 })
        ));
    }

    #[test]
    fn test_length_counts_utf16_units() {
        let validator = CommentValidator::new();
        assert!(validator.validate_content(&"맛".repeat(200)).is_ok());
        assert!(validator.validate_content(&"맛".repeat(201)).is_err());

        assert!(validator.validate_content(&"🍜".repeat(100)).is_ok());
        assert!(matches!(
            validator.validate_content(&"🍜".repeat(101)),
            Err(LunchPickerError::ContentTooLong { max: 200, actual: 202 })
        ));
    }

    #[test]
    fn test_custom_max_length() {
        let validator = CommentValidator::with_max_length(10);
        assert!(validator.validate_content("Short").is_ok());
        assert!(validator.validate_content("This is too long").is_err());
    }

    #[test]
    fn test_link_detection() {
        let validator = CommentValidator::new();
        assert!(matches!(
            validator.validate_content("check http://x.co"),
            Err(LunchPickerError::LinkNotAllowed)
        ));
        assert!(validator.validate_content("HTTPS://EXAMPLE.COM").is_err());
        assert!(validator.validate_content("www.x").is_err());
        assert!(validator.validate_content("WWW.menu").is_err());

        assert!(validator.validate_content("www").is_ok());
        assert!(validator.validate_content("www test").is_ok());
        assert!(validator.validate_content("http:// nothing after").is_ok());
    }

    #[test]
    fn test_length_checked_before_links() {
        let validator = CommentValidator::new();
        let content = format!("{} www.x", "a".repeat(200));
        assert!(matches!(
            validator.validate_content(&content),
            Err(LunchPickerError::ContentTooLong { .. })
        ));
    }
}
