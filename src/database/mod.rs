//! Tele Clipper database layer.
//!
//! Provides SQLite connection management and schema migrations for the
//! session-scoped credential store.
//!
//! # Usage
//!
//! ```no_run
//! use teleclipper::database::Database;
//!
//! let db = Database::open("session.db").expect("failed to open database");
//!
//! // Or use an in-memory database for testing
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
