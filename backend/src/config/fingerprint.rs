//! Verification key fingerprinting for operational visibility.
//!
//! Operators compare the fingerprint logged at start-up against the one
//! recorded for the deployed key pair. The key itself is never logged.

use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Truncated SHA-256 fingerprint of a PEM-encoded public key.
///
/// Returns the first 8 bytes of the digest as 16 lowercase hex characters.
///
/// # Examples
///
/// ```rust
/// use accounts::config::fingerprint::public_key_fingerprint;
///
/// let fp = public_key_fingerprint(b"-----BEGIN PUBLIC KEY-----");
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn public_key_fingerprint(public_pem: &[u8]) -> String {
    let digest = Sha256::digest(public_pem);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
