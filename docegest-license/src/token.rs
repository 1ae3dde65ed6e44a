//! License token parsing.
//!
//! Tokens use the format: `base64(gzip(payload_json)).base64(signature)`
//! with standard base64 in both segments. The signature covers the base64
//! text of the payload segment as transmitted, not its decoded bytes, so
//! the payload segment is kept verbatim here and only decoded once the
//! signature has passed.

use crate::error::{LicenseError, LicenseResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use flate2::read::GzDecoder;
use std::io::Read;

/// A license token split into its two wire segments.
#[derive(Debug, Clone)]
pub struct LicenseToken {
    payload_b64: String,
    signature: Vec<u8>,
}

impl LicenseToken {
    /// Splits a token string into its payload and signature segments.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidFormat`] unless the token has exactly
    /// two `.`-separated segments, and [`LicenseError::InvalidEncoding`] if
    /// the signature segment is not valid base64.
    pub fn decode(token: &str) -> LicenseResult<Self> {
        let token = token.trim();

        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 2 {
            return Err(LicenseError::InvalidFormat);
        }

        let signature = BASE64
            .decode(parts[1])
            .map_err(|e| LicenseError::InvalidEncoding(format!("signature segment: {e}")))?;

        Ok(Self {
            payload_b64: parts[0].to_string(),
            signature,
        })
    }

    /// Returns the payload segment exactly as transmitted. These are the
    /// bytes the vendor signed.
    #[must_use]
    pub fn payload_segment(&self) -> &str {
        &self.payload_b64
    }

    /// Returns the decoded signature bytes.
    #[must_use]
    pub fn signature_bytes(&self) -> &[u8] {
        &self.signature
    }

    /// Base64-decodes and gzip-decompresses the payload segment.
    ///
    /// Must only be called after the signature over the payload segment has
    /// verified; decompressing unauthenticated data is an ordering hazard.
    /// The activation pipeline enforces this sequencing.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidEncoding`] if the payload segment is
    /// not valid base64, [`LicenseError::CorruptPayload`] if the body is not
    /// a valid gzip stream.
    pub fn decompress_payload(&self) -> LicenseResult<Vec<u8>> {
        let packed = BASE64
            .decode(&self.payload_b64)
            .map_err(|e| LicenseError::InvalidEncoding(format!("payload segment: {e}")))?;

        let mut decoder = GzDecoder::new(packed.as_slice());
        let mut raw = Vec::new();
        decoder
            .read_to_end(&mut raw)
            .map_err(|e| LicenseError::CorruptPayload(format!("gzip: {e}")))?;

        Ok(raw)
    }
}
