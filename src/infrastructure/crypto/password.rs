//! PIN hashing utilities

use bcrypt::{hash, verify};

pub use bcrypt::DEFAULT_COST;

/// Hash an operator PIN using bcrypt
pub fn hash_pin(pin: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(pin, cost)
}

/// Verify a PIN against a hash
pub fn verify_pin(pin: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(pin, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_pin_verifies() {
        let hashed = hash_pin("1234", 4).unwrap();
        assert!(verify_pin("1234", &hashed).unwrap());
        assert!(!verify_pin("4321", &hashed).unwrap());
    }
}
