//! Ed25519 signature verification against the embedded vendor key.

use crate::error::{LicenseError, LicenseResult};
use ed25519_dalek::pkcs8::DecodePublicKey;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// SPKI PEM public key block compiled into the application at build time.
const EMBEDDED_PUBLIC_KEY_PEM: &str = include_str!("../assets/public_key.pem");

/// Verifies token signatures against a fixed Ed25519 public key.
///
/// The key is injected at construction and never mutated afterwards, so a
/// single verifier can be shared across threads without locking.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    /// Builds a verifier from the public key embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::KeyLoad`] if the embedded PEM does not parse.
    /// That indicates a corrupted build, not a user error.
    pub fn embedded() -> LicenseResult<Self> {
        Self::from_pem(EMBEDDED_PUBLIC_KEY_PEM)
    }

    /// Builds a verifier from a PEM-encoded SPKI public key block.
    pub fn from_pem(pem: &str) -> LicenseResult<Self> {
        let key = VerifyingKey::from_public_key_pem(pem)
            .map_err(|e| LicenseError::KeyLoad(format!("invalid public key PEM: {e}")))?;
        Ok(Self { key })
    }

    /// Builds a verifier from raw public key bytes.
    /// Used for testing with a generated key pair.
    pub fn from_bytes(bytes: &[u8; 32]) -> LicenseResult<Self> {
        let key = VerifyingKey::from_bytes(bytes)
            .map_err(|e| LicenseError::KeyLoad(format!("invalid public key bytes: {e}")))?;
        Ok(Self { key })
    }

    /// Verifies `signature` over `message` (the raw payload segment text).
    ///
    /// Pure and deterministic. Every failure collapses to
    /// [`LicenseError::InvalidSignature`] with no detail, so callers cannot
    /// learn which part of the comparison failed.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> LicenseResult<()> {
        let signature =
            Signature::from_slice(signature).map_err(|_| LicenseError::InvalidSignature)?;
        self.key
            .verify(message, &signature)
            .map_err(|_| LicenseError::InvalidSignature)
    }
}
