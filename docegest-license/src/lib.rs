//! Offline license activation and verification for DoceGest.
//!
//! This crate handles:
//! - License token decoding (`base64(gzip(json)).base64(signature)`)
//! - Ed25519 signature verification against the embedded vendor key
//! - Entitlement parsing and expiration checks
//! - Crash-safe persistence of the local activation record
//!
//! # Design Principles
//!
//! - **Fully offline**: no license server is ever contacted; a signed token
//!   is the sole proof of entitlement
//! - **Verify before decode**: the payload body is never decompressed or
//!   parsed until its signature has been verified
//! - **All-or-nothing activation**: a failed activation leaves the persisted
//!   record byte-for-byte unchanged
//! - **Stateless status**: `check_status` re-derives validity from the stored
//!   expiration on every call; the stored `active` flag is never trusted alone
//!
//! # Token Format
//!
//! Tokens are two standard-base64 segments joined by a single `.`:
//! the gzip-compressed entitlement JSON, and an Ed25519 signature computed
//! over the base64 text of the payload segment as transmitted.

mod activation;
mod entitlement;
mod error;
mod state;
mod token;
mod verifier;

pub use activation::LicenseService;
pub use entitlement::EntitlementRecord;
pub use error::{LicenseError, LicenseResult};
pub use state::{LicenseState, StateStore};
pub use token::LicenseToken;
pub use verifier::SignatureVerifier;
