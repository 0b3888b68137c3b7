use teleclipper::types::errors::*;

// === ValidationError Tests ===

#[test]
fn validation_error_codes_are_stable() {
    assert_eq!(ValidationError::EmptyAll.code(), "empty-all");
    assert_eq!(ValidationError::BadUrl.code(), "bad-url");
}

#[test]
fn validation_error_display_variants() {
    assert_eq!(ValidationError::EmptyAll.to_string(), "All form fields are empty");
    assert_eq!(ValidationError::BadUrl.to_string(), "URL is not valid");
}

// === SessionError Tests ===

#[test]
fn session_error_display_variants() {
    assert_eq!(
        SessionError::StorageError("disk full".to_string()).to_string(),
        "Session storage error: disk full"
    );
    assert_eq!(
        SessionError::CorruptEntry("teleClipperAuth".to_string()).to_string(),
        "Corrupt session entry: teleClipperAuth"
    );
}

#[test]
fn session_error_from_rusqlite() {
    let err: SessionError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, SessionError::StorageError(_)));
}

// === TransportError Tests ===

#[test]
fn transport_error_display_variants() {
    assert_eq!(
        TransportError::Network("connection refused".to_string()).to_string(),
        "Transport network error: connection refused"
    );
    assert_eq!(
        TransportError::Encoding("bad mime".to_string()).to_string(),
        "Transport encoding error: bad mime"
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("denied".to_string()).to_string(),
        "Settings I/O error: denied"
    );
    assert_eq!(
        SettingsError::SerializationError("eof".to_string()).to_string(),
        "Settings serialization error: eof"
    );
    assert_eq!(
        SettingsError::InvalidKey("a.b".to_string()).to_string(),
        "Invalid settings key: a.b"
    );
    assert_eq!(
        SettingsError::InvalidValue("x".to_string()).to_string(),
        "Invalid settings value: x"
    );
}

#[test]
fn all_errors_implement_error_trait() {
    let errors: Vec<Box<dyn std::error::Error>> = vec![
        Box::new(ValidationError::EmptyAll),
        Box::new(SessionError::StorageError("x".to_string())),
        Box::new(TransportError::Network("x".to_string())),
        Box::new(SettingsError::InvalidKey("x".to_string())),
    ];
    for err in errors {
        assert!(err.source().is_none());
    }
}
