//! Field validation run before any record is written.

use thiserror::Error;

use super::slug::is_valid_slug;

/// Max length of titles (content, announcements, programs)
pub const TITLE_MAX: usize = 500;

/// Max length of names and job titles
pub const NAME_MAX: usize = 100;

/// Max length of program links
pub const LINK_MAX: usize = 200;

/// Max length of an explicit slug (the longest title it could stand in for)
pub const SLUG_MAX: usize = TITLE_MAX;

/// Max length of stored image references
pub const IMAGE_MAX: usize = 100;

/// A record failed validation and was not written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} is too long: {actual} characters (max {max})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} must be unique: {value:?} already exists")]
    Duplicate { field: &'static str, value: String },

    #[error("{field} is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Records and drafts that can check their own fields
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Reject blank values
pub fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Reject values longer than `max` characters
pub fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

/// Length check for optional fields; unset always passes
pub fn optional_max_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => max_len(field, value, max),
        None => Ok(()),
    }
}

/// Required and bounded
pub fn required_max_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    required(field, value)?;
    max_len(field, value, max)
}

/// Validate a slug supplied by an editor
pub fn slug(value: Option<&str>) -> Result<(), ValidationError> {
    // An empty slug means "derive one"
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Ok(());
    };
    max_len("slug", value, SLUG_MAX)?;
    if !is_valid_slug(value) {
        return Err(ValidationError::Invalid {
            field: "slug",
            reason: "only letters, digits, '-' and '_' are allowed",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(required("title", "Morning Show").is_ok());
        assert_eq!(
            required("title", "   "),
            Err(ValidationError::Required { field: "title" })
        );
    }

    #[test]
    fn test_max_len_counts_characters() {
        assert!(max_len("name", &"é".repeat(100), NAME_MAX).is_ok());
        assert_eq!(
            max_len("name", &"x".repeat(101), NAME_MAX),
            Err(ValidationError::TooLong {
                field: "name",
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn test_optional_unset_passes() {
        assert!(optional_max_len("link", None, LINK_MAX).is_ok());
        assert!(optional_max_len("link", Some(""), LINK_MAX).is_ok());
        assert!(optional_max_len("link", Some(&"x".repeat(201)), LINK_MAX).is_err());
    }

    #[test]
    fn test_slug_validation() {
        assert!(slug(None).is_ok());
        assert!(slug(Some("morning-show")).is_ok());
        assert!(slug(Some(&"a".repeat(120))).is_ok());
        assert!(matches!(
            slug(Some("morning show")),
            Err(ValidationError::Invalid { field: "slug", .. })
        ));
        assert!(matches!(
            slug(Some(&"a".repeat(501))),
            Err(ValidationError::TooLong { field: "slug", .. })
        ));
    }
}
