//! Unit tests for the Session Store over both storage backends.

use tempfile::TempDir;

use teleclipper::database::Database;
use teleclipper::managers::session_store::{
    MemoryStorage, SessionStorage, SessionStore, SqliteStorage, AUTH_FLAG_KEY, PASSWORD_KEY,
};
use teleclipper::types::credential::Credential;
use teleclipper::types::errors::SessionError;

fn cred(secret: &str) -> Credential {
    Credential::new(secret).unwrap()
}

fn sqlite_store() -> SessionStore<SqliteStorage> {
    SessionStore::new(SqliteStorage::new(Database::open_in_memory().unwrap()))
}

#[test]
fn test_load_empty_store_is_none() {
    let store = SessionStore::new(MemoryStorage::new());
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_save_then_load_memory() {
    let mut store = SessionStore::new(MemoryStorage::new());
    store.save(&cred("secret123")).unwrap();
    assert_eq!(store.load().unwrap(), Some(cred("secret123")));
    assert_eq!(
        store.storage().get(AUTH_FLAG_KEY).unwrap().as_deref(),
        Some("true")
    );
}

#[test]
fn test_save_then_load_sqlite() {
    let mut store = sqlite_store();
    store.save(&cred("secret123")).unwrap();
    assert_eq!(store.load().unwrap(), Some(cred("secret123")));
}

#[test]
fn test_save_overwrites_previous_credential() {
    let mut store = sqlite_store();
    store.save(&cred("first")).unwrap();
    store.save(&cred("second")).unwrap();
    assert_eq!(store.load().unwrap(), Some(cred("second")));
}

#[test]
fn test_clear_removes_both_entries() {
    let mut store = sqlite_store();
    store.save(&cred("secret123")).unwrap();
    store.clear().unwrap();

    assert_eq!(store.load().unwrap(), None);
    assert_eq!(store.storage().get(AUTH_FLAG_KEY).unwrap(), None);
    assert_eq!(store.storage().get(PASSWORD_KEY).unwrap(), None);
}

#[test]
fn test_password_without_flag_is_absent() {
    let mut storage = MemoryStorage::new();
    storage.insert_raw(PASSWORD_KEY, "secret123");
    let store = SessionStore::new(storage);
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_flag_without_password_is_absent() {
    let mut storage = MemoryStorage::new();
    storage.insert_raw(AUTH_FLAG_KEY, "true");
    let store = SessionStore::new(storage);
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_flag_with_other_value_is_absent() {
    let mut storage = MemoryStorage::new();
    storage.insert_raw(AUTH_FLAG_KEY, "false");
    storage.insert_raw(PASSWORD_KEY, "secret123");
    let store = SessionStore::new(storage);
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_empty_password_entry_is_absent() {
    let mut storage = MemoryStorage::new();
    storage.insert_raw(AUTH_FLAG_KEY, "true");
    storage.insert_raw(PASSWORD_KEY, "");
    let store = SessionStore::new(storage);
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_resumed_session_keeps_credential() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("session.db");

    let session_id = {
        let mut store = SessionStore::new(SqliteStorage::new(Database::open(&path).unwrap()));
        let id = store.storage_mut().begin_session(None).unwrap();
        store.save(&cred("secret123")).unwrap();
        id
    };

    // Page reload: same browsing session.
    let mut store = SessionStore::new(SqliteStorage::new(Database::open(&path).unwrap()));
    let resumed = store.storage_mut().begin_session(Some(&session_id)).unwrap();
    assert_eq!(resumed, session_id);
    assert_eq!(store.load().unwrap(), Some(cred("secret123")));
}

#[test]
fn test_new_session_wipes_credential() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("session.db");

    let session_id = {
        let mut store = SessionStore::new(SqliteStorage::new(Database::open(&path).unwrap()));
        let id = store.storage_mut().begin_session(None).unwrap();
        store.save(&cred("secret123")).unwrap();
        id
    };

    let mut store = SessionStore::new(SqliteStorage::new(Database::open(&path).unwrap()));
    let fresh = store.storage_mut().begin_session(None).unwrap();
    assert_ne!(fresh, session_id);
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_unknown_resume_id_starts_fresh() {
    let mut store = SessionStore::new(MemoryStorage::new());
    let id = store.storage_mut().begin_session(None).unwrap();
    store.save(&cred("secret123")).unwrap();

    let other = store.storage_mut().begin_session(Some("not-the-session")).unwrap();
    assert_ne!(other, id);
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_non_text_entry_is_corrupt() {
    let db = Database::open_in_memory().unwrap();
    db.connection()
        .execute(
            "INSERT INTO session_storage (key, value, updated_at) VALUES (?1, X'00FF', 0)",
            [AUTH_FLAG_KEY],
        )
        .unwrap();
    let store = SessionStore::new(SqliteStorage::new(db));

    match store.load() {
        Err(SessionError::CorruptEntry(key)) => assert_eq!(key, AUTH_FLAG_KEY),
        other => panic!("expected CorruptEntry, got {:?}", other),
    }
}
