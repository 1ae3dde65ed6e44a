//! Durable local license state.
//!
//! One JSON record per installation, owned exclusively by the activation
//! orchestrator. Saves go through a sibling temp file followed by a rename,
//! so a crash or power loss mid-save can never leave a half-written record
//! behind the final path.

use crate::error::{LicenseError, LicenseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The persisted activation record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseState {
    /// Licensed subject, empty until first registration.
    pub subject_id: String,
    /// Contact email.
    pub email: String,
    /// Set only by a successful activation.
    pub active: bool,
    /// RFC 3339 expiration written at activation time, or empty.
    pub expiration_date: String,
}

impl LicenseState {
    /// Returns whether the stored record grants entitlement at `now`.
    ///
    /// The stored `active` flag is never trusted on its own: the expiration
    /// is re-parsed on every call, and an unreadable expiration degrades to
    /// `false` rather than an error.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if !self.active {
            return false;
        }
        match DateTime::parse_from_rfc3339(&self.expiration_date) {
            Ok(expires_at) => now < expires_at.with_timezone(&Utc),
            Err(_) => false,
        }
    }
}

/// File-backed store for the single [`LicenseState`] record.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Creates a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the platform data directory
    /// (`<data_dir>/docegest/license.json`), creating parents as needed.
    pub fn open_default() -> LicenseResult<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| LicenseError::Persistence("no platform data directory".to_string()))?;
        let dir = base.join("docegest");
        fs::create_dir_all(&dir)
            .map_err(|e| LicenseError::Persistence(format!("create {}: {e}", dir.display())))?;
        Ok(Self::new(dir.join("license.json")))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted state.
    ///
    /// A missing file is not an error: the default (inactive) state is
    /// persisted and returned, establishing the record for subsequent runs.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Persistence`] if the file exists but cannot
    /// be read or parsed.
    pub fn load(&self) -> LicenseResult<LicenseState> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no license state, initializing default");
            let state = LicenseState::default();
            self.save(&state)?;
            return Ok(state);
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| LicenseError::Persistence(format!("read {}: {e}", self.path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| LicenseError::Persistence(format!("parse {}: {e}", self.path.display())))
    }

    /// Durably replaces the persisted state in full.
    ///
    /// The record is written to a sibling temp file, flushed to disk, then
    /// renamed over the final path. `load` observes either the old record or
    /// the new one, never a mix.
    pub fn save(&self, state: &LicenseState) -> LicenseResult<()> {
        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| LicenseError::Persistence(format!("serialize state: {e}")))?;

        // Same directory as the final path so the rename stays on one filesystem.
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp_path).map_err(|e| {
                LicenseError::Persistence(format!("create {}: {e}", tmp_path.display()))
            })?;
            file.write_all(&json).map_err(|e| {
                LicenseError::Persistence(format!("write {}: {e}", tmp_path.display()))
            })?;
            file.sync_all().map_err(|e| {
                LicenseError::Persistence(format!("sync {}: {e}", tmp_path.display()))
            })?;
        }
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            LicenseError::Persistence(format!(
                "rename {} -> {}: {e}",
                tmp_path.display(),
                self.path.display()
            ))
        })?;

        debug!(path = %self.path.display(), active = state.active, "license state saved");
        Ok(())
    }
}
