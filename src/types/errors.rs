use std::fmt;

// === ValidationError ===

/// Local form-validation failures. These never reach the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// URL, note and attachment are all empty.
    EmptyAll,
    /// The URL field is non-empty but does not parse as an absolute URL.
    BadUrl,
}

impl ValidationError {
    /// Stable machine-readable code, used as the `Failed` reason.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyAll => "empty-all",
            ValidationError::BadUrl => "bad-url",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyAll => write!(f, "All form fields are empty"),
            ValidationError::BadUrl => write!(f, "URL is not valid"),
        }
    }
}

impl std::error::Error for ValidationError {}

// === SessionError ===

/// Errors raised by the durable session storage.
#[derive(Debug)]
pub enum SessionError {
    /// The backing store failed to read or write.
    StorageError(String),
    /// A stored entry exists but cannot be used.
    CorruptEntry(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::StorageError(msg) => write!(f, "Session storage error: {}", msg),
            SessionError::CorruptEntry(key) => write!(f, "Corrupt session entry: {}", key),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<rusqlite::Error> for SessionError {
    fn from(err: rusqlite::Error) -> Self {
        SessionError::StorageError(err.to_string())
    }
}

// === TransportError ===

/// Errors from the ingestion transport. The detail is for logs only.
#[derive(Debug)]
pub enum TransportError {
    /// No response was received (connection refused, DNS, TLS, reset...).
    Network(String),
    /// The request could not be assembled.
    Encoding(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "Transport network error: {}", msg),
            TransportError::Encoding(msg) => write!(f, "Transport encoding error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
