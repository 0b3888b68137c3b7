//! Gate Controller for Tele Clipper.
//!
//! Decides whether the submission form is reachable. Credentials are accepted
//! optimistically: nothing is verified at unlock time, the first submission
//! that comes back unauthorized re-locks the gate.

use serde::Serialize;

use crate::managers::session_store::{SessionStorage, SessionStore};
use crate::types::credential::Credential;
use crate::types::ui::{messages, Severity, UiEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Locked,
    Unlocking,
    Unlocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    /// Page load; `cached` tells whether the session store yielded a credential.
    Init { cached: bool },
    /// The credential prompt was submitted with this raw input.
    CredentialSubmitted(String),
    /// The session store accepted the credential.
    Persisted,
    /// The session store failed to write the credential.
    PersistFailed,
    /// A submission was rejected as unauthorized.
    AuthRejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEffect {
    Entered(GateState),
    Persist(Credential),
    ClearSession,
    Ui(UiEffect),
}

fn show_prompt(effects: &mut Vec<GateEffect>) {
    effects.push(GateEffect::Ui(UiEffect::CredentialOverlay { visible: true }));
    effects.push(GateEffect::Ui(UiEffect::FocusCredentialInput));
}

/// Pure gate transition function.
pub fn transition(state: GateState, event: GateEvent) -> (GateState, Vec<GateEffect>) {
    let mut effects = Vec::new();
    let next = match (state, event) {
        (_, GateEvent::Init { cached: true }) => {
            effects.push(GateEffect::Entered(GateState::Unlocked));
            effects.push(GateEffect::Ui(UiEffect::CredentialOverlay { visible: false }));
            GateState::Unlocked
        }
        (_, GateEvent::Init { cached: false }) => {
            effects.push(GateEffect::Entered(GateState::Locked));
            show_prompt(&mut effects);
            GateState::Locked
        }
        (GateState::Locked, GateEvent::CredentialSubmitted(input)) => match Credential::new(input) {
            Some(credential) => {
                effects.push(GateEffect::Entered(GateState::Unlocking));
                effects.push(GateEffect::Persist(credential));
                GateState::Unlocking
            }
            None => {
                effects.push(GateEffect::Ui(UiEffect::error(messages::MISSING_PASSWORD)));
                effects.push(GateEffect::Ui(UiEffect::FocusCredentialInput));
                GateState::Locked
            }
        },
        (GateState::Unlocking, GateEvent::Persisted) => {
            effects.push(GateEffect::Entered(GateState::Unlocked));
            effects.push(GateEffect::Ui(UiEffect::CredentialOverlay { visible: false }));
            effects.push(GateEffect::Ui(UiEffect::status("", Severity::None)));
            GateState::Unlocked
        }
        (GateState::Unlocking, GateEvent::PersistFailed) => {
            effects.push(GateEffect::Entered(GateState::Locked));
            effects.push(GateEffect::Ui(UiEffect::error(messages::STORE_FAILED)));
            effects.push(GateEffect::Ui(UiEffect::FocusCredentialInput));
            GateState::Locked
        }
        (_, GateEvent::AuthRejected) => {
            effects.push(GateEffect::ClearSession);
            effects.push(GateEffect::Entered(GateState::Locked));
            show_prompt(&mut effects);
            GateState::Locked
        }
        (state, _) => state,
    };
    (next, effects)
}

/// Stateful driver around [`transition`] that executes store effects.
#[derive(Debug)]
pub struct GateController {
    state: GateState,
}

impl Default for GateController {
    fn default() -> Self {
        Self::new()
    }
}

impl GateController {
    pub fn new() -> Self {
        Self {
            state: GateState::Locked,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    /// Picks the initial state from the session store.
    pub fn initialize<S: SessionStorage>(&mut self, store: &mut SessionStore<S>) -> Vec<UiEffect> {
        let cached = match store.load() {
            Ok(credential) => credential.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "session store unreadable, starting locked");
                false
            }
        };
        self.dispatch(GateEvent::Init { cached }, store)
    }

    /// Handles the credential prompt.
    pub fn enter_credential<S: SessionStorage>(
        &mut self,
        input: &str,
        store: &mut SessionStore<S>,
    ) -> Vec<UiEffect> {
        self.dispatch(GateEvent::CredentialSubmitted(input.to_string()), store)
    }

    /// Forces the gate back to `Locked` after a submission was unauthorized.
    pub fn force_lock<S: SessionStorage>(&mut self, store: &mut SessionStore<S>) -> Vec<UiEffect> {
        self.dispatch(GateEvent::AuthRejected, store)
    }

    fn dispatch<S: SessionStorage>(
        &mut self,
        event: GateEvent,
        store: &mut SessionStore<S>,
    ) -> Vec<UiEffect> {
        let mut ui = Vec::new();
        let mut pending = vec![event];

        while let Some(event) = pending.pop() {
            let (next, effects) = transition(self.state, event);
            self.state = next;
            for effect in effects {
                match effect {
                    GateEffect::Entered(state) => tracing::debug!(?state, "gate transition"),
                    GateEffect::Persist(credential) => match store.save(&credential) {
                        Ok(()) => pending.push(GateEvent::Persisted),
                        Err(e) => {
                            tracing::error!(error = %e, "failed to cache credential");
                            pending.push(GateEvent::PersistFailed);
                        }
                    },
                    GateEffect::ClearSession => {
                        if let Err(e) = store.clear() {
                            tracing::error!(error = %e, "failed to clear session store");
                        }
                    }
                    GateEffect::Ui(effect) => ui.push(effect),
                }
            }
        }

        ui
    }
}
