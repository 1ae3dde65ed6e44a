//! Entitlement payload parsing and expiry validation.
//!
//! The payload is a flat JSON object whose field names are the wire
//! contract shared with the vendor's issuing service:
//! `userId`, `email`, `issuedAt`, `expiresAt` (all strings, timestamps
//! in RFC 3339 with offset).

use crate::error::{LicenseError, LicenseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The decoded entitlement payload.
///
/// Only ever constructed from payload bytes whose signature has already
/// been verified; nothing in this record is partially trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementRecord {
    /// Licensed subject identifier.
    #[serde(rename = "userId")]
    pub subject_id: String,
    /// Contact email. Not validated for format.
    pub email: String,
    /// Issue timestamp. Informational only, not enforced.
    #[serde(rename = "issuedAt")]
    pub issued_at: String,
    /// Expiration timestamp.
    #[serde(rename = "expiresAt")]
    pub expires_at: String,
}

impl EntitlementRecord {
    /// Deserializes the decompressed payload bytes.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::CorruptPayload`] on malformed JSON. A payload
    /// that does not deserialize is rejected outright, never accepted as a
    /// zero-valued record.
    pub fn from_payload_bytes(bytes: &[u8]) -> LicenseResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| LicenseError::CorruptPayload(format!("entitlement JSON: {e}")))
    }

    /// Parses the `expiresAt` field as an RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::MalformedExpiration`] if the field does not
    /// parse.
    pub fn expires_at_parsed(&self) -> LicenseResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.expires_at)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| {
                LicenseError::MalformedExpiration(format!("{}: {e}", self.expires_at))
            })
    }

    /// Fails unless `expiresAt` is strictly after `now`.
    ///
    /// An expiration exactly equal to `now` counts as expired. Callers pass
    /// the wall clock read at verification time; freshness is re-derived on
    /// every activation attempt, never cached.
    pub fn ensure_not_expired_at(&self, now: DateTime<Utc>) -> LicenseResult<()> {
        let expires_at = self.expires_at_parsed()?;
        if now >= expires_at {
            return Err(LicenseError::Expired(self.expires_at.clone()));
        }
        Ok(())
    }
}
