//! Tele Clipper: session-gated clip submission controller.
//!
//! The library holds the gate and submission state machines, the validator,
//! the session store and the ingestion transport. The `teleclipper-rpc`
//! binary bridges them to the web front-end.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
