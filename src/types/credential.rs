use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// The cached password attached to every submission.
///
/// Opaque and never empty. `Debug` is redacted and the buffer is wiped on drop,
/// so the value only leaves the process as the `password` multipart field.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential(String);

impl Credential {
    /// Wraps user input. Returns `None` for an empty string.
    ///
    /// The input is kept verbatim; surrounding whitespace is part of the password.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            None
        } else {
            Some(Self(secret))
        }
    }

    /// Exposes the raw secret for the transport and the durable store.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}
