use serde::{Deserialize, Serialize};

use super::credential::Credential;
use super::form::Attachment;

/// Multipart field names understood by the ingestion endpoint.
pub const FIELD_URL: &str = "url";
pub const FIELD_NOTE: &str = "note";
pub const FIELD_FILE: &str = "file";
pub const FIELD_PASSWORD: &str = "password";

/// Everything sent in one submission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub url: String,
    pub note: String,
    pub attachment: Option<Attachment>,
    pub password: Credential,
}

/// Raw HTTP exchange result, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// JSON body returned by the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of one submission attempt. Produced exactly once per attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    ApplicationError(String),
    AuthRejected,
    NetworkError,
}
