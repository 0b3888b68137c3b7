// Tele Clipper shared type definitions
// Each submodule defines types used across the application.

pub mod credential;
pub mod errors;
pub mod form;
pub mod settings;
pub mod submission;
pub mod ui;
