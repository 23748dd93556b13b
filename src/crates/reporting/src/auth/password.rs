//! Password hashing

use super::AuthError;

/// Hash a password with bcrypt at the given cost
pub fn hash_password(plain: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(plain, cost)?)
}

/// Check a password against a bcrypt hash; malformed hashes never match
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    bcrypt::verify(plain, hashed).unwrap_or(false)
}
