use serde::{Deserialize, Serialize};

/// Content type used when the front-end does not supply one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A single file picked in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, content_type: Option<&str>, data: Vec<u8>) -> Self {
        let content_type = match content_type {
            Some(ct) if !ct.trim().is_empty() => ct.trim().to_string(),
            _ => DEFAULT_CONTENT_TYPE.to_string(),
        };
        Self {
            filename: filename.into(),
            content_type,
            data,
        }
    }
}

/// The three independent, optional user inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

impl FormFields {
    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }

    /// True when no field carries anything worth sending.
    pub fn is_blank(&self) -> bool {
        self.url.trim().is_empty() && self.note.trim().is_empty() && !self.has_attachment()
    }
}

/// Per-field verdict for the URL input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlVerdict {
    Empty,
    Valid,
    Invalid,
}

/// Verdict for the URL plus the aggregate submittability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub url: UrlVerdict,
    pub submittable: bool,
}
