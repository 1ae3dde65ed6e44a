//! Shared test helpers for license tests.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use ed25519_dalek::{Signer, SigningKey};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Returns a deterministic Ed25519 key pair from a fixed seed.
pub fn test_keypair() -> (SigningKey, [u8; 32]) {
    let seed: [u8; 32] = [
        11, 22, 33, 44, 55, 66, 77, 88, 99, 110, 121, 132, 143, 154, 165, 176, 187, 198, 209,
        220, 231, 242, 253, 8, 19, 30, 41, 52, 63, 74, 85, 96,
    ];
    let signing_key = SigningKey::from_bytes(&seed);
    let verifying_key = signing_key.verifying_key();
    (signing_key, verifying_key.to_bytes())
}

/// Returns a second, unrelated key pair for wrong-key scenarios.
pub fn other_keypair() -> (SigningKey, [u8; 32]) {
    let seed: [u8; 32] = [0x5a; 32];
    let signing_key = SigningKey::from_bytes(&seed);
    let verifying_key = signing_key.verifying_key();
    (signing_key, verifying_key.to_bytes())
}

/// Gzips and signs a payload JSON string into a wire token:
/// `base64(gzip(json)).base64(signature)`, with the signature computed over
/// the base64 text of the payload segment (matching the issuing service).
pub fn sign_token(signing_key: &SigningKey, payload_json: &str) -> String {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload_json.as_bytes()).unwrap();
    let packed = encoder.finish().unwrap();

    let payload_b64 = BASE64.encode(packed);
    let signature = signing_key.sign(payload_b64.as_bytes());
    let sig_b64 = BASE64.encode(signature.to_bytes());
    format!("{payload_b64}.{sig_b64}")
}

/// Entitlement JSON for the given subject expiring at `expires_at`.
pub fn record_json(subject: &str, email: &str, expires_at: DateTime<Utc>) -> String {
    let issued = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let expires = expires_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    format!(
        r#"{{"userId":"{subject}","email":"{email}","issuedAt":"{issued}","expiresAt":"{expires}"}}"#
    )
}

/// A correctly signed token for `subject` expiring one hour from now.
pub fn make_valid_token(signing_key: &SigningKey, subject: &str, email: &str) -> String {
    sign_token(
        signing_key,
        &record_json(subject, email, Utc::now() + Duration::hours(1)),
    )
}

/// A correctly signed token that expired one hour ago.
pub fn make_expired_token(signing_key: &SigningKey, subject: &str, email: &str) -> String {
    sign_token(
        signing_key,
        &record_json(subject, email, Utc::now() - Duration::hours(1)),
    )
}

/// Replaces the character at `index` within one segment of a token with a
/// different base64 alphabet character, leaving the segment length intact.
pub fn flip_char(segment: &str, index: usize) -> String {
    let mut chars: Vec<char> = segment.chars().collect();
    chars[index] = if chars[index] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}
