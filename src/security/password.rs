use crate::config::SecurityConfig;
use crate::error::Error;
use anyhow::Result;
use rand::seq::SliceRandom;

/// Characters drawn from when an admin resets a password
const RESET_ALPHABET: &[u8] =
    b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%&*";

/// bcrypt hash stored in `User::password_hash`
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    bcrypt::hash(password, config.password_hash_cost)
        .map_err(|e| Error::Internal(format!("Could not hash password: {}", e)).into())
}

/// Check `password` against a stored hash. A hash that bcrypt cannot read is
/// an error rather than a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    bcrypt::verify(password, stored_hash).map_err(|e| {
        Error::Authentication(format!("Stored password hash is unreadable: {}", e)).into()
    })
}

/// Temporary password handed out by a reset. Look-alike characters are left out.
pub fn generate_random_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .filter_map(|_| RESET_ALPHABET.choose(&mut rng))
        .map(|&b| char::from(b))
        .collect()
}
