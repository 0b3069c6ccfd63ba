//! Salted one-way password hashing with Argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

use crate::errors::{AppError, AppResult};

// Verified against when the email is unknown, so both login failures cost the same.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password_blocking("eduportal-timing-guard").ok());

fn hash_password_blocking(raw: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
}

fn verify_password_blocking(raw: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::InternalError(format!("Stored hash is malformed: {}", e)))?;

    match Argon2::default().verify_password(raw.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::InternalError(format!("Password verification failed: {}", e))),
    }
}

/// Hashes `raw` on the blocking pool.
pub async fn hash_password(raw: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password_blocking(&raw)).await?
}

/// Checks `raw` against a stored PHC hash on the blocking pool.
pub async fn verify_password(raw: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_password_blocking(&raw, &hash)).await?
}

/// Builds the dummy hash ahead of the first login. Returns whether it is usable.
pub async fn prepare_timing_guard() -> AppResult<bool> {
    let ready = tokio::task::spawn_blocking(|| DUMMY_HASH.is_some()).await?;
    if !ready {
        log::warn!("Dummy password hash unavailable; unknown-email logins skip verification");
    }
    Ok(ready)
}

/// Burns one verification for an unknown account. Always reports a mismatch.
pub async fn verify_against_dummy(raw: String) {
    let _ = tokio::task::spawn_blocking(move || {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = verify_password_blocking(&raw, hash);
        }
    })
    .await;
}
