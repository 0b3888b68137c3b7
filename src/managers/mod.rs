// Tele Clipper state managers
// Managers own state: the credential session store and the two controllers.

pub mod gate_controller;
pub mod session_store;
pub mod submission_controller;
