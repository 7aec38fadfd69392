// ============================
// diary-core/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use scrypt::{Params, Scrypt};

use crate::error::{Error, Result};

// Cost parameters: log_n 15 keeps one verification in the tens of
// milliseconds on current hardware.
const LOG_N: u8 = 15;
const R: u32 = 8;
const P: u32 = 1;

/// Hash a password using scrypt with a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let params = Params::new(LOG_N, R, P, Params::RECOMMENDED_LEN).map_err(|_| Error::Internal)?;
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, &salt)
        .map_err(|_| Error::Internal)?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored hash. An unparseable hash verifies
/// as false rather than erroring.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}
