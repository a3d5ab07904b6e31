use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use error_stack::{Result, ResultExt};
use std::sync::LazyLock;
use thiserror::Error;

static CONTEXT: LazyLock<Argon2<'static>> = LazyLock::new(|| {
    Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params(),
    )
});

#[cfg(not(test))]
fn params() -> argon2::Params {
    argon2::Params::DEFAULT
}

// Hashing with the default cost makes the test suite crawl.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
fn params() -> argon2::Params {
    use argon2::Params;
    Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None).unwrap()
}

#[derive(Debug, Error)]
#[error("Failed to generate password hash")]
pub struct HashPasswordError;

/// Hashes the password with a fresh salt. It is CPU heavy, call it
/// from [`tokio::task::spawn_blocking`].
pub fn hash(password: impl AsRef<[u8]>) -> Result<String, HashPasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = CONTEXT
        .hash_password(password.as_ref(), &salt)
        .map_err(|e| error_stack::Report::new(HashPasswordError).attach_printable(e))?;

    Ok(password_hash.to_string())
}

#[derive(Debug, Error)]
#[error("Failed to verify password")]
pub struct VerifyPasswordError;

/// Same as [`hash`], it must be called from a blocking thread.
pub fn verify(password: &[u8], hash: &str) -> Result<bool, VerifyPasswordError> {
    let hash = PasswordHash::new(hash)
        .map_err(|e| error_stack::Report::new(VerifyPasswordError).attach_printable(e))
        .attach_printable("could not parse password hash")?;

    match CONTEXT.verify_password(password, &hash) {
        Ok(..) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(error) => Err(error_stack::Report::new(VerifyPasswordError).attach_printable(error)),
    }
}
