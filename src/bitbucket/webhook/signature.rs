//! `X-Hub-Signature` handling: `sha256=<hex HMAC-SHA256 of the raw body, keyed with the webhook secret>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::StashError;

type HmacSha256 = Hmac<Sha256>;

/// The only algorithm Bitbucket signs deliveries with.
pub const SIGNATURE_ALGORITHM: &str = "sha256";

fn mac(key: &[u8]) -> HmacSha256 {
    HmacSha256::new_from_slice(key).expect("HMAC can take key of any size")
}

/// Signature value Bitbucket would send for `payload`; ie: `sha256=5bd1...`.
pub fn sign_payload(payload: &[u8], key: &[u8]) -> String {
    let mut mac = mac(key);
    mac.update(payload);
    format!("{}={}", SIGNATURE_ALGORITHM, hex::encode(mac.finalize().into_bytes()))
}

/// Checks a raw `X-Hub-Signature` value against `payload`. The digest comparison is constant-time.
pub fn verify_signature(signature: &str, payload: &[u8], key: &[u8]) -> Result<(), StashError> {
    if signature.is_empty() {
        return Err(StashError::SignatureFormatError("no signature found".to_string()));
    }

    let parts: Vec<&str> = signature.split('=').collect();
    if parts.len() != 2 {
        return Err(StashError::SignatureFormatError(
            "expected <algorithm>=<hex digest>".to_string(),
        ));
    }

    let (algorithm, digest) = (parts[0], parts[1]);
    if algorithm != SIGNATURE_ALGORITHM {
        return Err(StashError::UnsupportedAlgorithmError(algorithm.to_string()));
    }

    let digest = hex::decode(digest)
        .map_err(|e| StashError::SignatureFormatError(format!("unable to parse signature data: {}", e)))?;

    let mut mac = mac(key);
    mac.update(payload);
    mac.verify_slice(&digest).map_err(|_| StashError::SignatureMismatchError)
}
