//! Unit tests for the form validation rules.

use rstest::rstest;

use teleclipper::services::validator::{check_submittable, check_url, rejection, url_feedback, validate};
use teleclipper::types::errors::ValidationError;
use teleclipper::types::form::{Attachment, FormFields, UrlVerdict};
use teleclipper::types::ui::{FieldMarker, UiEffect};

#[rstest]
#[case("", UrlVerdict::Empty)]
#[case("   ", UrlVerdict::Empty)]
#[case("https://example.com", UrlVerdict::Valid)]
#[case("  https://example.com/path?q=1  ", UrlVerdict::Valid)]
#[case("http://localhost:8080", UrlVerdict::Valid)]
#[case("mailto:someone@example.com", UrlVerdict::Valid)]
#[case("not a url", UrlVerdict::Invalid)]
#[case("example.com", UrlVerdict::Invalid)]
#[case("/relative/path", UrlVerdict::Invalid)]
#[case("http://", UrlVerdict::Invalid)]
fn test_check_url(#[case] input: &str, #[case] expected: UrlVerdict) {
    assert_eq!(check_url(input), expected, "check_url({input:?})");
}

#[rstest]
#[case("", "", false, false)]
#[case("  ", "\n", false, false)]
#[case("", "hello", false, true)]
#[case("", "", true, true)]
#[case("https://example.com", "", false, true)]
#[case("not a url", "hello", true, false)]
#[case("not a url", "", false, false)]
fn test_check_submittable(
    #[case] url: &str,
    #[case] note: &str,
    #[case] attachment: bool,
    #[case] expected: bool,
) {
    assert_eq!(check_submittable(url, note, attachment), expected);
}

#[test]
fn test_validate_reports_url_and_aggregate() {
    let fields = FormFields {
        url: "https://example.com".to_string(),
        ..Default::default()
    };
    let result = validate(&fields);
    assert_eq!(result.url, UrlVerdict::Valid);
    assert!(result.submittable);
}

#[test]
fn test_rejection_with_attachment_only_is_none() {
    let fields = FormFields {
        attachment: Some(Attachment::new("a.png", Some("image/png"), vec![1, 2, 3])),
        ..Default::default()
    };
    assert_eq!(rejection(&fields), None);
}

#[test]
fn test_rejection_all_empty() {
    assert_eq!(rejection(&FormFields::default()), Some(ValidationError::EmptyAll));
}

#[test]
fn test_url_feedback_texts() {
    assert_eq!(
        url_feedback(UrlVerdict::Valid),
        UiEffect::UrlMarker {
            marker: FieldMarker::Valid,
            feedback: "✓ Valid URL".to_string()
        }
    );
    assert_eq!(
        url_feedback(UrlVerdict::Invalid),
        UiEffect::UrlMarker {
            marker: FieldMarker::Invalid,
            feedback: "✗ Invalid URL format".to_string()
        }
    );
    assert_eq!(
        url_feedback(UrlVerdict::Empty),
        UiEffect::UrlMarker {
            marker: FieldMarker::Neutral,
            feedback: String::new()
        }
    );
}

#[test]
fn test_attachment_defaults_content_type() {
    let attachment = Attachment::new("blob.bin", None, vec![]);
    assert_eq!(attachment.content_type, "application/octet-stream");
    let attachment = Attachment::new("blob.bin", Some("  "), vec![]);
    assert_eq!(attachment.content_type, "application/octet-stream");
}
