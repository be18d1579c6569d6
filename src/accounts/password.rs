use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the exact password bytes.
///
/// Unsalted and fast. Kept bit-for-bit so existing data files keep
/// authenticating; see DESIGN.md before changing it.
pub fn digest_password(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}
