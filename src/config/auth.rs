use serde::Deserialize;

use crate::util::Sensitive;

#[derive(Debug, Deserialize)]
pub struct Auth {
    /// Secret key used to sign and verify identity tokens. It must
    /// have at least 12 characters.
    ///
    /// **Environment variables**:
    /// - `CHIRPER_AUTH_JWT_SECRET` or `JWT_SECRET`
    pub jwt_secret: Sensitive<String>,

    /// How long an identity token can be used before it expires.
    ///
    /// **Environment variables**:
    /// - `CHIRPER_AUTH_TOKEN_LIFETIME_SECS`
    #[serde(default = "Auth::default_token_lifetime_secs")]
    pub token_lifetime_secs: u64,
}

impl Auth {
    pub const JWT_SECRET_MIN: usize = 12;
    pub const JWT_SECRET_MAX: usize = 1024;

    const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 60 * 60;

    const fn default_token_lifetime_secs() -> u64 {
        Self::DEFAULT_TOKEN_LIFETIME_SECS
    }
}
