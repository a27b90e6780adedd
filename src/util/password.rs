//! Password hashing and verification utilities
//!
//! Passwords are stored as Argon2id PHC strings with a per-password random salt.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{debug, error};

/// Error types for password operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
    #[error("Failed to verify password: {0}")]
    VerificationFailed(String),
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

pub trait PasswordUtils {
    /// Hashes the given password using Argon2id algorithm
    fn hash_password(password: &str) -> Result<String, PasswordError>;

    /// Verifies the given password against the stored hash
    fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError>;
}

pub struct PasswordUtilsImpl;

impl PasswordUtils for PasswordUtilsImpl {
    fn hash_password(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| {
                error!("Failed to hash password: {}", err);
                PasswordError::HashingFailed(err.to_string())
            })
    }

    fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|err| {
            error!("Invalid password hash format: {}", err);
            PasswordError::InvalidHashFormat
        })?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed - invalid password");
                Ok(false)
            }
            Err(err) => {
                error!("Password verification error: {}", err);
                Err(PasswordError::VerificationFailed(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_argon2_phc_string() {
        let hash = PasswordUtilsImpl::hash_password("secret-pass-1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "secret-pass-1");
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let a = PasswordUtilsImpl::hash_password("secret-pass-1").unwrap();
        let b = PasswordUtilsImpl::hash_password("secret-pass-1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_matches_only_hashed_password() {
        let hash = PasswordUtilsImpl::hash_password("secret-pass-1").unwrap();
        assert!(PasswordUtilsImpl::verify_password("secret-pass-1", &hash).unwrap());
        assert!(!PasswordUtilsImpl::verify_password("secret-pass-2", &hash).unwrap());
        assert!(!PasswordUtilsImpl::verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let result = PasswordUtilsImpl::verify_password("secret", "not-a-hash");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }
}
