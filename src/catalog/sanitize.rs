//! Form input sanitization
//!
//! Validation runs as an explicit first stage before any business logic:
//! `sanitize_*` either yields a clean value or a `ValidationErrors` that the
//! caller renders back into the form. Neither path touches the store.

use garde::Validate;
use serde::Serialize;

/// Longest accepted genre name, counted in characters before escaping
pub const MAX_GENRE_NAME_LEN: usize = 100;

/// Message used when the create form is submitted without a name
pub const CREATE_NAME_REQUIRED: &str = "Genre name required";

/// Message used when the update form is submitted without a name
pub const UPDATE_NAME_REQUIRED: &str = "Name must not be empty";

/// A trimmed, non-empty, markup-escaped genre name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreName(String);

impl GenreName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// One failed rule on one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub value: String,
}

/// Rejected form input
///
/// Carries the sanitized value so the form can be re-rendered with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub value: String,
    pub errors: Vec<FieldError>,
}

/// Genre form after trimming, as checked by the length rule
#[derive(Debug, Validate)]
struct TrimmedGenre {
    // Must match MAX_GENRE_NAME_LEN
    #[garde(length(chars, min = 1, max = 100))]
    name: String,
}

/// Trim, length-check and escape a submitted genre name
///
/// `required_message` is reported when nothing but whitespace was submitted.
pub fn sanitize_genre_name(
    raw: &str,
    required_message: &str,
) -> Result<GenreName, ValidationErrors> {
    let input = TrimmedGenre {
        name: raw.trim().to_string(),
    };
    let value = escape_markup(&input.name);

    let report = match input.validate() {
        Ok(()) => return Ok(GenreName(value)),
        Err(report) => report,
    };

    let message = if input.name.is_empty() {
        required_message.to_string()
    } else {
        format!("Genre name must be at most {} characters", MAX_GENRE_NAME_LEN)
    };

    let errors = report
        .iter()
        .map(|(path, _)| FieldError {
            field: path.to_string(),
            message: message.clone(),
            value: value.clone(),
        })
        .collect();

    Err(ValidationErrors { value, errors })
}

/// Replace HTML-significant characters with entities
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_surrounding_whitespace() {
        let name = sanitize_genre_name("  Science Fiction \n", CREATE_NAME_REQUIRED).unwrap();
        assert_eq!(name.as_str(), "Science Fiction");
    }

    #[test]
    fn test_whitespace_only_is_rejected_with_caller_message() {
        let err = sanitize_genre_name(" \t ", UPDATE_NAME_REQUIRED).unwrap_err();
        assert_eq!(err.value, "");
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].message, UPDATE_NAME_REQUIRED);
        assert_eq!(err.errors[0].field, "name");
    }

    #[test]
    fn test_markup_is_escaped() {
        let name = sanitize_genre_name("<b>Tom & Jerry's</b>", CREATE_NAME_REQUIRED).unwrap();
        assert_eq!(
            name.into_inner(),
            "&lt;b&gt;Tom &amp; Jerry&#x27;s&lt;&#x2F;b&gt;"
        );
    }

    #[test]
    fn test_length_limit_counts_characters_before_escaping() {
        let at_limit = "é".repeat(MAX_GENRE_NAME_LEN);
        assert!(sanitize_genre_name(&at_limit, CREATE_NAME_REQUIRED).is_ok());

        // Escaping expands '&' but the limit applies to what was typed
        let ampersands = "&".repeat(MAX_GENRE_NAME_LEN);
        assert!(sanitize_genre_name(&ampersands, CREATE_NAME_REQUIRED).is_ok());

        let too_long = "x".repeat(MAX_GENRE_NAME_LEN + 1);
        let err = sanitize_genre_name(&too_long, CREATE_NAME_REQUIRED).unwrap_err();
        assert_eq!(err.value, too_long);
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "name");
        assert_eq!(
            err.errors[0].message,
            "Genre name must be at most 100 characters"
        );
    }

    #[test]
    fn test_length_rule_matches_max_constant() {
        let at_limit = TrimmedGenre { name: "x".repeat(MAX_GENRE_NAME_LEN) };
        assert!(at_limit.validate().is_ok());

        let over = TrimmedGenre { name: "x".repeat(MAX_GENRE_NAME_LEN + 1) };
        let report = over.validate().unwrap_err();
        assert_eq!(report.iter().count(), 1);

        assert!(TrimmedGenre { name: String::new() }.validate().is_err());
    }

    #[test]
    fn test_escape_markup_leaves_plain_text_alone() {
        assert_eq!(escape_markup("Drama"), "Drama");
        assert_eq!(escape_markup("a\\b`c\"d"), "a&#x5C;b&#96;c&quot;d");
    }
}
