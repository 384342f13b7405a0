use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{UserError, UserResult};

/// One-way password hashing used at registration and login
pub trait PasswordHashing: Send + Sync {
    fn hash(&self, password: &str) -> UserResult<String>;

    /// `Ok(false)` on mismatch; errors only for malformed stored hashes
    fn verify(&self, password: &str, hash: &str) -> UserResult<bool>;
}

/// Argon2id with default parameters and a random salt per hash
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl PasswordHashing for Argon2Hasher {
    fn hash(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("secret1").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "secret1");
        assert!(hasher.verify("secret1", &hash).unwrap());
        assert!(!hasher.verify("secret2", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = Argon2Hasher;
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = Argon2Hasher.verify("secret", "not-a-phc-string");
        assert!(matches!(result, Err(UserError::PasswordHash(_))));
    }
}
