//! SQLite connection for the session database.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use super::migrations;
use crate::types::errors::SessionError;

/// Several adapter processes may share one file; writers wait this long for the lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

/// Owns the `rusqlite::Connection` and runs migrations on open.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file, creating its parent directory first.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SessionError::StorageError(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Self::with_connection(conn)
    }

    /// In-memory database, discarded on drop.
    pub fn open_in_memory() -> Result<Self, SessionError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, SessionError> {
        migrations::run_all(&conn)?;
        tracing::trace!(
            schema_version = migrations::get_schema_version(&conn),
            "session database ready"
        );
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Mutable access, needed to open a transaction.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
