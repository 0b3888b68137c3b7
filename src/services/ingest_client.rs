//! Ingestion endpoint client.
//!
//! Sends one multipart request per submission and maps the raw exchange to a
//! [`SubmissionOutcome`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use crate::types::errors::TransportError;
use crate::types::settings::EndpointSettings;
use crate::types::submission::{
    IngestReply, SubmissionOutcome, SubmissionPayload, TransportResponse, FIELD_FILE, FIELD_NOTE,
    FIELD_PASSWORD, FIELD_URL,
};
use crate::types::ui::messages;

/// Request/response capability consumed by the submission controller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, payload: SubmissionPayload) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport posting to a fixed endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Builds a client for the configured endpoint. No request timeout is set.
    pub fn new(settings: &EndpointSettings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Encoding(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: settings.url.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Assembles the multipart body. Text fields are always present, possibly empty.
pub fn build_form(payload: SubmissionPayload) -> Result<Form, TransportError> {
    let SubmissionPayload {
        url,
        note,
        attachment,
        password,
    } = payload;

    let mut form = Form::new()
        .text(FIELD_URL, url)
        .text(FIELD_NOTE, note)
        .text(FIELD_PASSWORD, password.expose().to_string());

    if let Some(attachment) = attachment {
        let part = Part::bytes(attachment.data)
            .file_name(attachment.filename)
            .mime_str(&attachment.content_type)
            .map_err(|e| TransportError::Encoding(e.to_string()))?;
        form = form.part(FIELD_FILE, part);
    }

    Ok(form)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, payload: SubmissionPayload) -> Result<TransportResponse, TransportError> {
        let has_file = payload.attachment.is_some();
        let form = build_form(payload)?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        tracing::debug!(status, has_file, body_len = body.len(), "ingest endpoint replied");
        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

/// Maps a raw exchange to the attempt outcome.
///
/// 401 wins over any body. Unparseable bodies count as network failures.
pub fn interpret(result: Result<TransportResponse, TransportError>) -> SubmissionOutcome {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "submission transport failed");
            return SubmissionOutcome::NetworkError;
        }
    };

    if response.status == StatusCode::UNAUTHORIZED.as_u16() {
        return SubmissionOutcome::AuthRejected;
    }

    let reply: IngestReply = match serde_json::from_slice(&response.body) {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(status = response.status, error = %e, "malformed ingest reply");
            return SubmissionOutcome::NetworkError;
        }
    };

    let server_message = |reply: IngestReply| {
        reply
            .error
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| messages::SERVER_ERROR.to_string())
    };

    if !response.is_success() {
        return SubmissionOutcome::ApplicationError(server_message(reply));
    }

    if reply.success {
        SubmissionOutcome::Success
    } else {
        SubmissionOutcome::ApplicationError(server_message(reply))
    }
}
