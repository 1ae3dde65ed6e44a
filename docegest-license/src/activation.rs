//! Activation orchestration: the two user-facing license operations.

use crate::entitlement::EntitlementRecord;
use crate::error::{LicenseError, LicenseResult};
use crate::state::StateStore;
use crate::token::LicenseToken;
use crate::verifier::SignatureVerifier;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Composes the token codec, signature verifier, entitlement parser and
/// state store into the application-facing activation API.
///
/// Owns the state store exclusively; no other component reads or writes
/// the persisted record.
pub struct LicenseService {
    verifier: SignatureVerifier,
    store: StateStore,
}

impl LicenseService {
    /// Creates a service with an explicit verifier.
    /// Tests inject alternate key pairs here.
    #[must_use]
    pub fn new(verifier: SignatureVerifier, store: StateStore) -> Self {
        Self { verifier, store }
    }

    /// Creates a service verifying against the embedded vendor key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::KeyLoad`] if the embedded key block does not
    /// parse (corrupted build).
    pub fn with_embedded_key(store: StateStore) -> LicenseResult<Self> {
        Ok(Self::new(SignatureVerifier::embedded()?, store))
    }

    /// Records the subject identity ahead of activation.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidInput`] if either input is empty, or
    /// [`LicenseError::Persistence`] if the state cannot be written.
    pub fn register(&self, subject_id: &str, email: &str) -> LicenseResult<()> {
        if subject_id.is_empty() {
            return Err(LicenseError::InvalidInput(
                "subject id must not be empty".to_string(),
            ));
        }
        if email.is_empty() {
            return Err(LicenseError::InvalidInput(
                "email must not be empty".to_string(),
            ));
        }

        let mut state = self.store.load()?;
        state.subject_id = subject_id.to_string();
        state.email = email.to_string();
        self.store.save(&state)?;

        debug!(subject_id, "subject registered");
        Ok(())
    }

    /// Verifies a license token and durably records the entitlement.
    ///
    /// The pipeline is strictly sequential: decode the token, verify the
    /// signature over the raw payload segment, and only then decompress and
    /// parse the payload. Any failure aborts before the state store is
    /// touched, so a failed activation leaves the persisted record
    /// unchanged. A failed save is a failed activation.
    pub fn activate(&self, token: &str) -> LicenseResult<EntitlementRecord> {
        let token = LicenseToken::decode(token)?;
        self.verifier
            .verify(token.payload_segment().as_bytes(), token.signature_bytes())?;

        // Signature has passed; the payload body is now trusted enough to decode.
        let payload = token.decompress_payload()?;
        let record = EntitlementRecord::from_payload_bytes(&payload)?;
        record.ensure_not_expired_at(Utc::now())?;

        let mut state = self.store.load()?;
        state.subject_id = record.subject_id.clone();
        state.email = record.email.clone();
        state.active = true;
        state.expiration_date = record.expires_at.clone();
        self.store.save(&state)?;

        info!(
            subject_id = %record.subject_id,
            expires_at = %record.expires_at,
            "license activated"
        );
        Ok(record)
    }

    /// Reports whether the stored entitlement is currently valid.
    ///
    /// This is a query, not a verification: it reads only the persisted
    /// state, re-parses the stored expiration against the current wall
    /// clock, and degrades every failure (unreadable state, unparseable
    /// expiration) to `false` instead of surfacing an error.
    #[must_use]
    pub fn check_status(&self) -> bool {
        let state = match self.store.load() {
            Ok(state) => state,
            Err(e) => {
                warn!("license state unreadable: {e}");
                return false;
            }
        };
        state.is_valid_at(Utc::now())
    }
}
