// Tele Clipper services
// Stateless engines: validation, the ingestion transport, settings.

pub mod ingest_client;
pub mod settings_engine;
pub mod validator;
