//! Submission Controller for Tele Clipper.
//!
//! Orchestrates one submission attempt: local validation, session lookup,
//! dispatch to the transport and interpretation of the reply. Every attempt
//! ends back in `Idle` with the busy indicator cleared.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::managers::session_store::{SessionStorage, SessionStore};
use crate::services::ingest_client::{self, Transport};
use crate::services::validator;
use crate::types::credential::Credential;
use crate::types::errors::ValidationError;
use crate::types::form::{FormFields, UrlVerdict};
use crate::types::submission::{SubmissionOutcome, SubmissionPayload};
use crate::types::ui::{messages, Severity, UiEffect};

/// Why an attempt ended without success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "message", rename_all = "kebab-case")]
pub enum FailureReason {
    EmptyAll,
    BadUrl,
    NoSession,
    Auth,
    Network,
    Server(String),
}

impl From<ValidationError> for FailureReason {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyAll => FailureReason::EmptyAll,
            ValidationError::BadUrl => FailureReason::BadUrl,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::EmptyAll => write!(f, "empty-all"),
            FailureReason::BadUrl => write!(f, "bad-url"),
            FailureReason::NoSession => write!(f, "no-session"),
            FailureReason::Auth => write!(f, "auth"),
            FailureReason::Network => write!(f, "network"),
            FailureReason::Server(msg) => write!(f, "{}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "failure", rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Validating,
    Sending,
    Succeeded,
    Failed(FailureReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    /// User pressed submit. `credential` is the session store read taken at that moment.
    SubmitRequested {
        fields: FormFields,
        credential: Option<Credential>,
    },
    /// The in-flight request finished.
    Completed(SubmissionOutcome),
    /// The URL input changed or lost focus.
    UrlEdited(String),
    /// The reset control was pressed.
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEffect {
    Entered(SubmissionState),
    Dispatch(SubmissionPayload),
    /// The credential was refused; the gate must re-lock and drop the session.
    AuthRejected,
    Ui(UiEffect),
}

fn fail(effects: &mut Vec<SubmissionEffect>, reason: FailureReason, text: &str) -> SubmissionState {
    effects.push(SubmissionEffect::Entered(SubmissionState::Failed(reason)));
    effects.push(SubmissionEffect::Ui(UiEffect::error(text)));
    effects.push(SubmissionEffect::Entered(SubmissionState::Idle));
    SubmissionState::Idle
}

/// Cleanup shared by every exit from `Sending`.
fn leave_sending(effects: &mut Vec<SubmissionEffect>) {
    effects.push(SubmissionEffect::Ui(UiEffect::Busy { active: false }));
}

fn begin_attempt(
    fields: FormFields,
    credential: Option<Credential>,
    effects: &mut Vec<SubmissionEffect>,
) -> SubmissionState {
    effects.push(SubmissionEffect::Entered(SubmissionState::Validating));

    if let Some(err) = validator::rejection(&fields) {
        if err == ValidationError::BadUrl {
            effects.push(SubmissionEffect::Ui(validator::url_feedback(UrlVerdict::Invalid)));
        }
        let text = match err {
            ValidationError::EmptyAll => messages::EMPTY_ALL,
            ValidationError::BadUrl => messages::BAD_URL,
        };
        return fail(effects, err.into(), text);
    }

    let Some(password) = credential else {
        return fail(effects, FailureReason::NoSession, messages::NO_SESSION);
    };

    let FormFields {
        url,
        note,
        attachment,
    } = fields;
    effects.push(SubmissionEffect::Entered(SubmissionState::Sending));
    effects.push(SubmissionEffect::Ui(UiEffect::Busy { active: true }));
    effects.push(SubmissionEffect::Ui(UiEffect::status(messages::SENDING, Severity::Info)));
    effects.push(SubmissionEffect::Dispatch(SubmissionPayload {
        url: url.trim().to_string(),
        note,
        attachment,
        password,
    }));
    SubmissionState::Sending
}

fn finish_attempt(outcome: SubmissionOutcome, effects: &mut Vec<SubmissionEffect>) -> SubmissionState {
    leave_sending(effects);
    match outcome {
        SubmissionOutcome::Success => {
            effects.push(SubmissionEffect::Entered(SubmissionState::Succeeded));
            effects.push(SubmissionEffect::Ui(UiEffect::ClearForm));
            effects.push(SubmissionEffect::Ui(validator::url_feedback(UrlVerdict::Empty)));
            effects.push(SubmissionEffect::Ui(UiEffect::status(
                messages::SUCCESS,
                Severity::Success,
            )));
            effects.push(SubmissionEffect::Entered(SubmissionState::Idle));
            SubmissionState::Idle
        }
        SubmissionOutcome::ApplicationError(msg) => {
            let text = msg.clone();
            fail(effects, FailureReason::Server(msg), &text)
        }
        SubmissionOutcome::AuthRejected => {
            effects.push(SubmissionEffect::AuthRejected);
            fail(effects, FailureReason::Auth, messages::AUTH_FAILED)
        }
        SubmissionOutcome::NetworkError => fail(effects, FailureReason::Network, messages::NETWORK),
    }
}

fn reset_effects(state: &SubmissionState, effects: &mut Vec<SubmissionEffect>) {
    effects.push(SubmissionEffect::Ui(UiEffect::ClearForm));
    effects.push(SubmissionEffect::Ui(validator::url_feedback(UrlVerdict::Empty)));
    // The busy indicator belongs to the in-flight attempt.
    if *state != SubmissionState::Sending {
        effects.push(SubmissionEffect::Ui(UiEffect::status("", Severity::None)));
        effects.push(SubmissionEffect::Ui(UiEffect::Busy { active: false }));
    }
}

/// Pure submission transition function.
///
/// Only `Idle` and `Sending` are resting states; the others are passed through
/// and reported as `Entered` effects.
pub fn transition(
    state: SubmissionState,
    event: SubmissionEvent,
) -> (SubmissionState, Vec<SubmissionEffect>) {
    let mut effects = Vec::new();
    let next = match (state, event) {
        (SubmissionState::Sending, SubmissionEvent::SubmitRequested { .. }) => {
            SubmissionState::Sending
        }
        (_, SubmissionEvent::SubmitRequested { fields, credential }) => {
            begin_attempt(fields, credential, &mut effects)
        }
        (SubmissionState::Sending, SubmissionEvent::Completed(outcome)) => {
            finish_attempt(outcome, &mut effects)
        }
        (state, SubmissionEvent::Completed(_)) => state,
        (state, SubmissionEvent::UrlEdited(url)) => {
            effects.push(SubmissionEffect::Ui(validator::url_feedback(
                validator::check_url(&url),
            )));
            state
        }
        (state, SubmissionEvent::Reset) => {
            reset_effects(&state, &mut effects);
            state
        }
    };
    (next, effects)
}

/// What the adapter has to act on after one controller step.
#[derive(Debug, Default)]
pub struct Step {
    pub ui: Vec<UiEffect>,
    pub dispatch: Option<SubmissionPayload>,
    pub auth_rejected: bool,
    pub visited: Vec<SubmissionState>,
}

impl Step {
    fn absorb(&mut self, effects: Vec<SubmissionEffect>) {
        for effect in effects {
            match effect {
                SubmissionEffect::Entered(state) => self.visited.push(state),
                SubmissionEffect::Dispatch(payload) => self.dispatch = Some(payload),
                SubmissionEffect::AuthRejected => self.auth_rejected = true,
                SubmissionEffect::Ui(effect) => self.ui.push(effect),
            }
        }
    }
}

/// Stateful driver around [`transition`].
#[derive(Debug)]
pub struct SubmissionController {
    state: SubmissionState,
    attempt: Option<Uuid>,
    last_failure: Option<FailureReason>,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            attempt: None,
            last_failure: None,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == SubmissionState::Sending
    }

    /// Reason the most recent attempt failed, cleared by a successful one.
    pub fn last_failure(&self) -> Option<&FailureReason> {
        self.last_failure.as_ref()
    }

    fn step(&mut self, event: SubmissionEvent) -> Step {
        let (next, effects) = transition(self.state.clone(), event);
        self.state = next;
        let mut step = Step::default();
        step.absorb(effects);

        for state in &step.visited {
            match state {
                SubmissionState::Failed(reason) => {
                    tracing::info!(attempt = ?self.attempt, %reason, "submission failed");
                    self.last_failure = Some(reason.clone());
                }
                SubmissionState::Succeeded => {
                    tracing::info!(attempt = ?self.attempt, "submission succeeded");
                    self.last_failure = None;
                }
                _ => tracing::trace!(attempt = ?self.attempt, ?state, "submission transition"),
            }
        }
        step
    }

    /// Starts an attempt. A no-op while another attempt is in flight.
    ///
    /// Returns the payload to hand to the transport in `Step::dispatch`.
    pub fn begin<S: SessionStorage>(&mut self, fields: FormFields, store: &SessionStore<S>) -> Step {
        if self.is_sending() {
            tracing::debug!("submit ignored, attempt already in flight");
            return Step::default();
        }

        self.attempt = Some(Uuid::new_v4());
        // Only read the session once the form itself is acceptable.
        let credential = if validator::rejection(&fields).is_none() {
            let credential = store.load().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "session store unreadable during submit");
                None
            });
            if credential.is_none() {
                tracing::error!(attempt = ?self.attempt, "submit reached without a cached credential");
            }
            credential
        } else {
            None
        };

        let step = self.step(SubmissionEvent::SubmitRequested { fields, credential });
        if let Some(payload) = &step.dispatch {
            tracing::info!(
                attempt = ?self.attempt,
                has_url = !payload.url.is_empty(),
                note_len = payload.note.len(),
                has_file = payload.attachment.is_some(),
                "dispatching submission"
            );
        }
        step
    }

    /// Finishes the in-flight attempt. Ignored when nothing is in flight.
    pub fn complete(&mut self, outcome: SubmissionOutcome) -> Step {
        self.step(SubmissionEvent::Completed(outcome))
    }

    pub fn url_edited(&mut self, url: &str) -> Vec<UiEffect> {
        self.step(SubmissionEvent::UrlEdited(url.to_string())).ui
    }

    pub fn reset(&mut self) -> Vec<UiEffect> {
        self.step(SubmissionEvent::Reset).ui
    }

    /// Runs a whole attempt against `transport`, awaiting the reply.
    pub async fn submit<S, T>(
        &mut self,
        fields: FormFields,
        store: &SessionStore<S>,
        transport: &T,
    ) -> Step
    where
        S: SessionStorage,
        T: Transport + ?Sized,
    {
        let mut step = self.begin(fields, store);
        let Some(payload) = step.dispatch.take() else {
            return step;
        };

        let outcome = ingest_client::interpret(transport.send(payload).await);
        let finished = self.complete(outcome);
        step.ui.extend(finished.ui);
        step.visited.extend(finished.visited);
        step.auth_rejected = finished.auth_rejected;
        step
    }
}
