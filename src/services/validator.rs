//! Form validation rules.
//!
//! Pure functions: called on every URL keystroke/blur and once at the start of
//! each submission attempt.

use url::Url;

use crate::types::errors::ValidationError;
use crate::types::form::{FormFields, UrlVerdict, ValidationResult};
use crate::types::ui::{messages, FieldMarker, UiEffect};

/// Classifies the URL field. Blank input is `Empty`, which is acceptable.
///
/// Only absolute URLs pass: `example.com` has no scheme and is `Invalid`.
pub fn check_url(value: &str) -> UrlVerdict {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return UrlVerdict::Empty;
    }
    match Url::parse(trimmed) {
        Ok(_) => UrlVerdict::Valid,
        Err(_) => UrlVerdict::Invalid,
    }
}

/// True iff at least one field is present and the URL is not invalid.
pub fn check_submittable(url: &str, note: &str, attachment_present: bool) -> bool {
    let any_present = !url.trim().is_empty() || !note.trim().is_empty() || attachment_present;
    any_present && check_url(url) != UrlVerdict::Invalid
}

/// Full verdict for a set of form fields.
pub fn validate(fields: &FormFields) -> ValidationResult {
    ValidationResult {
        url: check_url(&fields.url),
        submittable: check_submittable(&fields.url, &fields.note, fields.has_attachment()),
    }
}

/// Explains why a form is not submittable. Emptiness wins over a bad URL.
pub fn rejection(fields: &FormFields) -> Option<ValidationError> {
    if fields.is_blank() {
        Some(ValidationError::EmptyAll)
    } else if check_url(&fields.url) == UrlVerdict::Invalid {
        Some(ValidationError::BadUrl)
    } else {
        None
    }
}

/// Marker and feedback text shown next to the URL input.
pub fn url_feedback(verdict: UrlVerdict) -> UiEffect {
    let (marker, feedback) = match verdict {
        UrlVerdict::Empty => (FieldMarker::Neutral, ""),
        UrlVerdict::Valid => (FieldMarker::Valid, messages::URL_VALID),
        UrlVerdict::Invalid => (FieldMarker::Invalid, messages::URL_INVALID),
    };
    UiEffect::UrlMarker {
        marker,
        feedback: feedback.to_string(),
    }
}
