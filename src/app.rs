//! App Core for Tele Clipper.
//!
//! Owns the session store, both controllers and the transport, and routes
//! front-end events between them. Everything returned is a list of
//! [`UiEffect`]s for the rendering layer.

use std::path::PathBuf;
use std::sync::Arc;

use crate::database::connection::Database;
use crate::managers::gate_controller::{GateController, GateState};
use crate::managers::session_store::{MemoryStorage, SessionStorage, SessionStore, SqliteStorage};
use crate::managers::submission_controller::{SubmissionController, SubmissionState};
use crate::platform;
use crate::services::ingest_client::{self, HttpTransport, Transport};
use crate::types::errors::{SessionError, TransportError};
use crate::types::form::FormFields;
use crate::types::settings::{ClipperSettings, SessionBackend};
use crate::types::submission::{SubmissionOutcome, SubmissionPayload, TransportResponse};
use crate::types::ui::UiEffect;

pub type DynStorage = Box<dyn SessionStorage + Send>;

/// Central application struct.
pub struct App {
    pub settings: ClipperSettings,
    store: SessionStore<DynStorage>,
    gate: GateController,
    submission: SubmissionController,
    transport: Arc<dyn Transport>,
    session_id: Option<String>,
}

/// Opens the storage backend selected in the settings.
pub fn open_storage(settings: &ClipperSettings) -> Result<DynStorage, SessionError> {
    match settings.session.backend {
        SessionBackend::Memory => Ok(Box::new(MemoryStorage::new())),
        SessionBackend::Sqlite => {
            let path = match &settings.session.database_path {
                Some(path) => PathBuf::from(path),
                None => platform::get_data_dir().join("session.db"),
            };
            tracing::debug!(path = %path.display(), "opening session database");
            let db = Database::open(&path)?;
            Ok(Box::new(SqliteStorage::new(db)))
        }
    }
}

impl App {
    /// Creates an App with the configured storage backend and an HTTP transport.
    pub fn new(settings: ClipperSettings) -> Result<Self, Box<dyn std::error::Error>> {
        let storage = open_storage(&settings)?;
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&settings.endpoint)?);
        Ok(Self::with_parts(settings, storage, transport))
    }

    /// Creates an App from explicit parts. Tests pass fakes here.
    pub fn with_parts(
        settings: ClipperSettings,
        storage: DynStorage,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            settings,
            store: SessionStore::new(storage),
            gate: GateController::new(),
            submission: SubmissionController::new(),
            transport,
            session_id: None,
        }
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn submission_state(&self) -> &SubmissionState {
        self.submission.state()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn store(&self) -> &SessionStore<DynStorage> {
        &self.store
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Page load. Binds the browsing session, then lets the gate pick its state.
    pub fn init(&mut self, resume: Option<&str>) -> Vec<UiEffect> {
        match self.store.storage_mut().begin_session(resume) {
            Ok(id) => self.session_id = Some(id),
            Err(e) => tracing::error!(error = %e, "could not bind browsing session"),
        }
        self.gate.initialize(&mut self.store)
    }

    pub fn unlock(&mut self, password: &str) -> Vec<UiEffect> {
        self.gate.enter_credential(password, &mut self.store)
    }

    pub fn url_changed(&mut self, url: &str) -> Vec<UiEffect> {
        self.submission.url_edited(url)
    }

    pub fn reset_form(&mut self) -> Vec<UiEffect> {
        self.submission.reset()
    }

    /// Starts a submission. The returned payload, if any, must be sent and
    /// its result fed back through [`App::finish_submit`].
    pub fn begin_submit(&mut self, fields: FormFields) -> (Vec<UiEffect>, Option<SubmissionPayload>) {
        let step = self.submission.begin(fields, &self.store);
        (step.ui, step.dispatch)
    }

    /// Feeds the transport result back and re-locks the gate on rejection.
    pub fn finish_submit(
        &mut self,
        result: Result<TransportResponse, TransportError>,
    ) -> Vec<UiEffect> {
        self.complete_with(ingest_client::interpret(result))
    }

    pub fn complete_with(&mut self, outcome: SubmissionOutcome) -> Vec<UiEffect> {
        let step = self.submission.complete(outcome);
        let mut ui = step.ui;
        if step.auth_rejected {
            ui.extend(self.gate.force_lock(&mut self.store));
        }
        ui
    }

    /// Runs a whole submission in place, awaiting the transport.
    pub async fn submit(&mut self, fields: FormFields) -> Vec<UiEffect> {
        let (mut ui, payload) = self.begin_submit(fields);
        if let Some(payload) = payload {
            let result = self.transport.send(payload).await;
            ui.extend(self.finish_submit(result));
        }
        ui
    }
}
