//! One-way password hashing (bcrypt).

use anyhow::Result;

/// The minimum cost bcrypt accepts (the constant is private in the bcrypt crate).
pub const MIN_COST: u32 = 4;

/// Hash a plaintext password with the given bcrypt cost.
pub fn hash(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).map_err(Into::into)
}

/// Verify a plaintext password against a stored hash.
///
/// A malformed stored hash counts as a failed verification.
pub fn verify(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
