use chrono::{DateTime, TimeDelta, Utc};
use error_stack::{Report, Result, ResultExt};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

use crate::model::User;
use crate::App;

static JWT_HEADER: LazyLock<Header> = LazyLock::new(|| Header::new(Algorithm::HS512));
static JWT_LOGIN_ISSUER: &str = "chirper.login";

/// Claims of the identity token given to a user after logging in.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginClaims {
    pub nbf: i64,
    pub exp: i64,
    pub iss: String,
    /// Handle of the user.
    pub sub: String,
}

impl LoginClaims {
    #[must_use]
    pub fn generate(app: &App, user: &User, now: Option<DateTime<Utc>>) -> Self {
        let now = now.unwrap_or_else(Utc::now);
        let lifetime = i64::try_from(app.config.auth.token_lifetime_secs).unwrap_or(i64::MAX);

        Self {
            nbf: now.timestamp(),
            exp: (now + TimeDelta::seconds(lifetime)).timestamp(),
            iss: JWT_LOGIN_ISSUER.to_string(),
            sub: user.handle.clone(),
        }
    }

    pub fn decode(app: &App, token: &str) -> Result<Self, DecodeJwtError> {
        app.decode_jwt(token, JWT_LOGIN_ISSUER)
    }

    pub fn encode(&self, app: &App) -> Result<String, EncodeJwtError> {
        app.encode_to_jwt(self)
    }
}

#[derive(Debug, Error)]
pub enum DecodeJwtError {
    /// The token is not a JWT at all.
    #[error("Malformed JWT")]
    Malformed,
    /// The token is a JWT but it is not trusted anymore or at all.
    #[error("Rejected JWT")]
    Rejected,
    #[error("Failed to decode JWT")]
    Unknown,
}

#[derive(Debug, Error)]
#[error("Failed to encode claims as JWT")]
pub struct EncodeJwtError;

impl App {
    pub(crate) fn setup_jwt_keys(secret: &[u8]) -> (EncodingKey, DecodingKey) {
        (
            EncodingKey::from_secret(secret),
            DecodingKey::from_secret(secret),
        )
    }

    pub fn encode_to_jwt<T: Serialize>(&self, claims: &T) -> Result<String, EncodeJwtError> {
        jsonwebtoken::encode(&JWT_HEADER, claims, &self.jwt_encode).change_context(EncodeJwtError)
    }

    pub fn decode_jwt<T: DeserializeOwned>(
        &self,
        token: &str,
        issuer: &str,
    ) -> Result<T, DecodeJwtError> {
        // Tokens are issued and checked by this server alone, so there
        // is no clock skew to tolerate and `exp` is exact.
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);

        let token = token.replace(char::is_whitespace, "");
        match jsonwebtoken::decode(&token, &self.jwt_decode, &validation) {
            Ok(d) => Ok(d.claims),
            Err(error) => {
                let context = match error.kind() {
                    ErrorKind::InvalidToken
                    | ErrorKind::Base64(..)
                    | ErrorKind::Json(..)
                    | ErrorKind::Utf8(..)
                    | ErrorKind::MissingRequiredClaim(..) => DecodeJwtError::Malformed,
                    ErrorKind::InvalidSignature
                    | ErrorKind::ExpiredSignature
                    | ErrorKind::ImmatureSignature
                    | ErrorKind::InvalidIssuer
                    | ErrorKind::InvalidAlgorithm => DecodeJwtError::Rejected,
                    _ => DecodeJwtError::Unknown,
                };
                Err(Report::new(error).change_context(context))
            }
        }
    }
}
