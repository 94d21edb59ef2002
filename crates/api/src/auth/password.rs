//! Password storage and account password policy.
//!
//! Hashes are Argon2id in PHC string form, so parameters and salt travel
//! with the hash and can be tightened later without a schema change. The
//! minimum-length policy lives here too: admin-created accounts (docenten
//! and students alike) go through [`validate_password_strength`] before a
//! hash is ever computed.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Minimum password length accepted for any account.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Hash a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a login attempt against the stored PHC hash.
///
/// A mismatch is `Ok(false)`, not an error; `Err` means the stored hash
/// itself is malformed or verification failed for another reason.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Enforce the account password policy ([`MIN_PASSWORD_LENGTH`]).
///
/// The message is safe to return to the admin creating the account.
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_hash_is_argon2id_phc() {
        let hash = hash_password("docent-initial-password").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "PHC prefix must be argon2id");

        let ok = verify_password("docent-initial-password", &hash)
            .expect("verify should succeed");
        assert!(ok);
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("the-real-password").expect("hashing should succeed");
        let ok = verify_password("a-guessed-password", &hash).expect("verify should succeed");
        assert!(!ok, "mismatch must be Ok(false), not an error");
    }

    #[test]
    fn test_verify_errors_on_malformed_hash() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(result.is_err(), "a broken stored hash is an error, not a mismatch");
    }

    #[test]
    fn test_policy_rejects_short_password() {
        // Eleven characters, one below the minimum.
        let result = validate_password_strength("elf-tekens!");
        assert!(result.is_err());
        let msg = result.unwrap_err();
        assert!(
            msg.contains(&MIN_PASSWORD_LENGTH.to_string()),
            "rejection must state the minimum length"
        );
    }

    #[test]
    fn test_policy_accepts_minimum_and_longer() {
        // Exactly at the boundary.
        assert!(validate_password_strength("twaalftekens").is_ok());
        // Multibyte characters count as characters, not bytes.
        assert!(validate_password_strength("wachtwöördje").is_ok());
        assert!(validate_password_strength("a-comfortably-long-password").is_ok());
    }
}
