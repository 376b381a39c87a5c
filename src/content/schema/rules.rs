//! Custom `validator` rules shared by the entity schemas.

use std::borrow::Cow;
use validator::ValidationError;

pub const MAX_SLUG_LEN: usize = 64;

/// Lowercase ASCII letters and digits separated by single hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if is_slug(slug) {
        Ok(())
    } else {
        Err(ValidationError::new("slug").with_message(Cow::Borrowed(
            "Slug must be lowercase letters, digits and single hyphens",
        )))
    }
}

pub fn is_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Kick-off time written as `HH:MM` on a 24-hour clock.
pub fn validate_time_of_day(time: &str) -> Result<(), ValidationError> {
    let valid = chrono::NaiveTime::parse_from_str(time, "%H:%M").is_ok() && time.len() == 5;
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("time_of_day")
            .with_message(Cow::Borrowed("Time must be formatted as HH:MM")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_rules() {
        assert!(is_slug("premier-league"));
        assert!(is_slug("league1"));
        assert!(!is_slug(""));
        assert!(!is_slug("Premier-League"));
        assert!(!is_slug("-premier"));
        assert!(!is_slug("premier-"));
        assert!(!is_slug("premier--league"));
        assert!(!is_slug("premier league"));
        assert!(!is_slug(&"a".repeat(MAX_SLUG_LEN + 1)));
    }

    #[test]
    fn test_time_of_day() {
        assert!(validate_time_of_day("16:00").is_ok());
        assert!(validate_time_of_day("09:30").is_ok());
        assert!(validate_time_of_day("9:30").is_err());
        assert!(validate_time_of_day("25:00").is_err());
        assert!(validate_time_of_day("16:00:00").is_err());
    }

    #[test]
    fn test_slug_error_code() {
        let err = validate_slug("Bad Slug").unwrap_err();
        assert_eq!(err.code, "slug");
    }
}
