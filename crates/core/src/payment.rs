//! Payment gateway signature checks.
//!
//! The gateways themselves are opaque; all this portal ever needs from them
//! is a boolean "this callback is authentic" gate before unlocking a
//! download or share action.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex HMAC-SHA256 signature the primary gateway attaches to a
/// completed payment: the key is the shared secret, the message is
/// `"{order_id}|{payment_id}"`.
pub fn payment_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    let digest = mac.finalize().into_bytes();
    format!("{digest:x}")
}

/// Verify a gateway callback signature. Plain hex-string equality against
/// the recomputed signature.
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    payment_signature(secret, order_id, payment_id) == signature
}

/// Build the checksum header the alternative gateway requires on pay-page
/// initiation: `sha256(base64_payload + api_path + salt_key)` in hex,
/// suffixed with `"###"` and the salt index.
pub fn pay_page_checksum(
    salt_key: &str,
    salt_index: u32,
    base64_payload: &str,
    api_path: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(base64_payload.as_bytes());
    hasher.update(api_path.as_bytes());
    hasher.update(salt_key.as_bytes());
    let digest = hasher.finalize();
    format!("{digest:x}###{salt_index}")
}
