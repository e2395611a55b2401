use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

use crate::config::PasswordHashing;
use crate::contract::model::{Password, User};
use crate::domain::error::DomainError;
use crate::domain::validator::{matches, Validator, EMAIL_RX};

pub const MAX_NAME_BYTES: usize = 500;
pub const MIN_PASSWORD_BYTES: usize = 8;
pub const MAX_PASSWORD_BYTES: usize = 72;

impl PasswordHashing {
    fn hasher(&self) -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| DomainError::hashing(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Password {
    /// Hash `plaintext` with a fresh salt and keep the plaintext around for
    /// validation.
    pub fn set(&mut self, plaintext: &str, params: &PasswordHashing) -> Result<(), DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = params
            .hasher()?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| DomainError::hashing(e.to_string()))?
            .to_string();

        self.plaintext = Some(Zeroizing::new(plaintext.to_string()));
        self.hash = Some(hash);
        Ok(())
    }

    /// `Ok(false)` on a wrong password; `Err` only when the stored hash is
    /// missing or unreadable.
    pub fn matches(&self, plaintext: &str) -> Result<bool, DomainError> {
        let stored = self
            .hash
            .as_deref()
            .ok_or_else(|| DomainError::hashing("no password hash to compare against"))?;
        let parsed = PasswordHash::new(stored).map_err(|e| DomainError::hashing(e.to_string()))?;

        // Cost parameters come from the PHC string, not from the verifier.
        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DomainError::hashing(e.to_string())),
        }
    }

    /// Drop the plaintext once it is no longer needed.
    pub fn clear_plaintext(&mut self) {
        self.plaintext = None;
    }
}

pub fn validate_email(v: &mut Validator, email: &str) {
    v.check(!email.is_empty(), "email", "must be provided");
    v.check(
        matches(email, &EMAIL_RX),
        "email",
        "must be a valid email address",
    );
}

pub fn validate_password_plaintext(v: &mut Validator, password: &str) {
    v.check(!password.is_empty(), "password", "must be provided");
    v.check(
        (MIN_PASSWORD_BYTES..=MAX_PASSWORD_BYTES).contains(&password.len()),
        "password",
        "must be at least 8 bytes long and not be more than 72 bytes long",
    );
}

/// Validate a fully-formed user.
///
/// # Panics
/// When the user has no password hash. That is a construction bug, not bad input.
pub fn validate_user(v: &mut Validator, user: &User) {
    v.check(!user.name.is_empty(), "name", "must be provided");
    v.check(
        user.name.len() <= MAX_NAME_BYTES,
        "name",
        "must not be more than 500 bytes long",
    );

    validate_email(v, &user.email);

    if let Some(plaintext) = user.password.plaintext() {
        validate_password_plaintext(v, plaintext);
    }

    assert!(user.password.has_hash(), "missing password hash for user");
}
