//! Error types for the licensing engine.

use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Token does not split into exactly two `.`-separated segments.
    #[error("invalid token format: expected exactly two segments")]
    InvalidFormat,

    /// A token segment is not valid base64.
    #[error("invalid token encoding: {0}")]
    InvalidEncoding(String),

    /// Ed25519 signature verification failed.
    #[error("token signature invalid")]
    InvalidSignature,

    /// Payload decompression or deserialization failed.
    #[error("corrupt token payload: {0}")]
    CorruptPayload(String),

    /// The `expiresAt` field is not a parseable RFC 3339 timestamp.
    #[error("malformed expiration timestamp: {0}")]
    MalformedExpiration(String),

    /// License expired on the given date.
    #[error("license expired on {0}")]
    Expired(String),

    /// The embedded public key cannot be parsed. Indicates a corrupted
    /// build, not a recoverable end-user condition.
    #[error("public key load failed: {0}")]
    KeyLoad(String),

    /// The local license state cannot be read or durably written.
    #[error("license state persistence failed: {0}")]
    Persistence(String),

    /// A registration input was empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl LicenseError {
    /// Returns true for failures that mean the installation is broken rather
    /// than the token being bad. The UI routes these to "contact support"
    /// instead of "re-enter your license".
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::KeyLoad(_) | Self::Persistence(_))
    }
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
