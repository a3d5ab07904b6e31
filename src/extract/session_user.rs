use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use std::ops::Deref;

use crate::error::{ApiError, ErrorCategory};
use crate::model::User;
use crate::services::users::Authenticate;
use crate::util::Sensitive;
use crate::App;

/// The user who made the request, identified by the bearer token
/// from the `Authorization` HTTP header.
#[derive(Clone)]
pub struct SessionUser {
    pub user: User,
}

impl SessionUser {
    #[must_use]
    pub fn into_inner(self) -> User {
        self.user
    }
}

impl Deref for SessionUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

impl std::fmt::Debug for SessionUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // for diagnostic purposes
        f.debug_struct("SessionUser")
            .field("handle", &self.user.handle)
            .finish_non_exhaustive()
    }
}

#[axum::async_trait]
impl FromRequestParts<App> for SessionUser {
    type Rejection = ApiError;

    #[tracing::instrument(skip_all, name = "extractors.session_user")]
    async fn from_request_parts(parts: &mut Parts, app: &App) -> Result<Self, Self::Rejection> {
        // A missing header and a header with another scheme than
        // `Bearer` are both treated as not being logged in.
        let header = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, app)
            .await
            .map_err(|_| {
                ApiError::new(ErrorCategory::Unauthenticated)
                    .message("Missing bearer token in Authorization header")
            })?;

        let request = Authenticate {
            token: Sensitive::new(header.token()),
        };

        let user = request.perform(app).await?;
        Ok(Self { user })
    }
}
