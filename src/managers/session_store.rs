//! Session Store for Tele Clipper.
//!
//! Caches a single credential for the lifetime of a browsing session. The pair
//! `teleClipperAuth = "true"` / `teleClipperPassword = <credential>` is either
//! fully present or treated as absent.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::database::connection::Database;
use crate::types::credential::Credential;
use crate::types::errors::SessionError;

pub const AUTH_FLAG_KEY: &str = "teleClipperAuth";
pub const PASSWORD_KEY: &str = "teleClipperPassword";
const AUTH_FLAG_VALUE: &str = "true";

/// Durable key-value capability scoped to one browsing session.
///
/// `set_many` and `remove_many` must apply all entries or none.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), SessionError>;
    fn remove_many(&mut self, keys: &[&str]) -> Result<(), SessionError>;

    /// Binds the storage to a browsing session.
    ///
    /// When `resume` names the session that owns the stored entries they are
    /// kept (a page reload). Otherwise the entries are wiped and a fresh
    /// session id is returned.
    fn begin_session(&mut self, resume: Option<&str>) -> Result<String, SessionError>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        (**self).get(key)
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), SessionError> {
        (**self).set_many(entries)
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), SessionError> {
        (**self).remove_many(keys)
    }

    fn begin_session(&mut self, resume: Option<&str>) -> Result<String, SessionError> {
        (**self).begin_session(resume)
    }
}

/// In-process storage. Lives as long as the value does.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    session_id: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a single raw entry, bypassing the store. Lets tests build partial state.
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), SessionError> {
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), SessionError> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }

    fn begin_session(&mut self, resume: Option<&str>) -> Result<String, SessionError> {
        if let (Some(requested), Some(current)) = (resume, self.session_id.as_deref()) {
            if requested == current {
                return Ok(current.to_string());
            }
        }
        let session_id = Uuid::new_v4().to_string();
        self.entries.clear();
        self.session_id = Some(session_id.clone());
        Ok(session_id)
    }
}

/// SQLite-backed storage; survives page reloads of the same browsing session.
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl SessionStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.db
            .connection()
            .query_row(
                "SELECT value FROM session_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| match e {
                rusqlite::Error::InvalidColumnType(..) => SessionError::CorruptEntry(key.to_string()),
                other => other.into(),
            })
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), SessionError> {
        let now = unix_now();
        let tx = self.db.connection_mut().transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO session_storage (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![key, value, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), SessionError> {
        let tx = self.db.connection_mut().transaction()?;
        for key in keys {
            tx.execute("DELETE FROM session_storage WHERE key = ?1", params![key])?;
        }
        tx.commit()?;
        Ok(())
    }

    fn begin_session(&mut self, resume: Option<&str>) -> Result<String, SessionError> {
        let current: Option<String> = self
            .db
            .connection()
            .query_row(
                "SELECT session_id FROM session_meta WHERE id = 'current'",
                [],
                |row| row.get(0),
            )
            .optional()?;

        if let (Some(requested), Some(current)) = (resume, current.as_deref()) {
            if requested == current {
                tracing::debug!(session_id = current, "resuming browsing session");
                return Ok(current.to_string());
            }
        }

        let session_id = Uuid::new_v4().to_string();
        let tx = self.db.connection_mut().transaction()?;
        tx.execute("DELETE FROM session_storage", [])?;
        tx.execute(
            "INSERT OR REPLACE INTO session_meta (id, session_id, started_at) VALUES ('current', ?1, ?2)",
            params![session_id, unix_now()],
        )?;
        tx.commit()?;
        tracing::info!(session_id = %session_id, "started new browsing session");
        Ok(session_id)
    }
}

/// Thin wrapper enforcing the both-or-neither credential invariant.
pub struct SessionStore<S: SessionStorage> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the cached credential, or `None` unless both entries are present.
    pub fn load(&self) -> Result<Option<Credential>, SessionError> {
        let flag = self.storage.get(AUTH_FLAG_KEY)?;
        if flag.as_deref() != Some(AUTH_FLAG_VALUE) {
            return Ok(None);
        }
        Ok(self.storage.get(PASSWORD_KEY)?.and_then(Credential::new))
    }

    /// Stores the credential and raises the flag in one write.
    ///
    /// The password is listed first so a non-transactional backend never
    /// exposes a raised flag without a password.
    pub fn save(&mut self, credential: &Credential) -> Result<(), SessionError> {
        self.storage.set_many(&[
            (PASSWORD_KEY, credential.expose()),
            (AUTH_FLAG_KEY, AUTH_FLAG_VALUE),
        ])
    }

    /// Removes both entries, flag first.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.storage.remove_many(&[AUTH_FLAG_KEY, PASSWORD_KEY])
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
