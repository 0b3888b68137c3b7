//! Rendering instructions emitted by the controllers.
//!
//! The controllers never touch a rendering surface. They return [`UiEffect`]
//! values and the adapter replays them into a [`UiSink`].

use serde::{Deserialize, Serialize};

/// Status line severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    None,
    Info,
    Success,
    Error,
}

/// Visual marker for the URL input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMarker {
    Neutral,
    Valid,
    Invalid,
}

/// One rendering instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEffect {
    /// Replace the status line.
    Status { text: String, severity: Severity },
    /// Show or hide the busy indicator; the submit control is disabled while busy.
    Busy { active: bool },
    /// Mark the URL input and set its feedback text.
    UrlMarker { marker: FieldMarker, feedback: String },
    /// Show or hide the credential overlay.
    CredentialOverlay { visible: bool },
    /// Move keyboard focus to the credential input.
    FocusCredentialInput,
    /// Clear url, note and file inputs.
    ClearForm,
}

impl UiEffect {
    pub fn status(text: impl Into<String>, severity: Severity) -> Self {
        UiEffect::Status {
            text: text.into(),
            severity,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::status(text, Severity::Error)
    }
}

/// User-visible texts.
pub mod messages {
    pub const SENDING: &str = "Sending to Telegram...";
    pub const SUCCESS: &str = "Success!";
    pub const EMPTY_ALL: &str = "Please provide at least one field";
    pub const BAD_URL: &str = "Please enter a valid URL";
    pub const NETWORK: &str = "Network error: Could not reach the server";
    pub const AUTH_FAILED: &str = "Authentication failed. Please re-enter your password.";
    pub const NO_SESSION: &str = "Session expired. Please unlock again.";
    pub const MISSING_PASSWORD: &str = "Please enter a password";
    pub const STORE_FAILED: &str = "Could not store password";
    pub const SERVER_ERROR: &str = "Server error";
    pub const URL_VALID: &str = "✓ Valid URL";
    pub const URL_INVALID: &str = "✗ Invalid URL format";
}

/// Rendering capability consumed by the adapter.
pub trait UiSink {
    fn show_status(&mut self, text: &str, severity: Severity);
    fn set_busy(&mut self, active: bool);
    fn mark_url(&mut self, marker: FieldMarker, feedback: &str);
    fn set_credential_overlay(&mut self, visible: bool);
    fn focus_credential_input(&mut self);
    fn clear_form(&mut self);

    /// Dispatches a single effect to the matching method.
    fn apply(&mut self, effect: &UiEffect) {
        match effect {
            UiEffect::Status { text, severity } => self.show_status(text, *severity),
            UiEffect::Busy { active } => self.set_busy(*active),
            UiEffect::UrlMarker { marker, feedback } => self.mark_url(*marker, feedback),
            UiEffect::CredentialOverlay { visible } => self.set_credential_overlay(*visible),
            UiEffect::FocusCredentialInput => self.focus_credential_input(),
            UiEffect::ClearForm => self.clear_form(),
        }
    }

    fn apply_all(&mut self, effects: &[UiEffect]) {
        for effect in effects {
            self.apply(effect);
        }
    }
}

/// A sink that records effects in order.
#[derive(Debug, Default, Clone)]
pub struct EffectLog {
    pub effects: Vec<UiEffect>,
}

impl EffectLog {
    pub fn take(&mut self) -> Vec<UiEffect> {
        std::mem::take(&mut self.effects)
    }
}

impl UiSink for EffectLog {
    fn show_status(&mut self, text: &str, severity: Severity) {
        self.effects.push(UiEffect::status(text, severity));
    }

    fn set_busy(&mut self, active: bool) {
        self.effects.push(UiEffect::Busy { active });
    }

    fn mark_url(&mut self, marker: FieldMarker, feedback: &str) {
        self.effects.push(UiEffect::UrlMarker {
            marker,
            feedback: feedback.to_string(),
        });
    }

    fn set_credential_overlay(&mut self, visible: bool) {
        self.effects.push(UiEffect::CredentialOverlay { visible });
    }

    fn focus_credential_input(&mut self) {
        self.effects.push(UiEffect::FocusCredentialInput);
    }

    fn clear_form(&mut self) {
        self.effects.push(UiEffect::ClearForm);
    }
}
