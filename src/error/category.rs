use axum::http::StatusCode;

/// Every kind of failure a client may receive from Chirper.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Store, media or any other unexpected failure.
    #[default]
    Internal,
    /// Malformed or missing required fields.
    InvalidRequest,
    /// Missing or malformed identity token.
    Unauthenticated,
    /// Unknown handle or wrong password during login.
    InvalidCredentials,
    /// Valid request but the caller is not allowed to perform it, or
    /// the identity token has an invalid signature or has expired.
    Forbidden,
    NotFound,
    Conflict,
    AlreadyDone,
}

impl ErrorCategory {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::InvalidRequest => "invalid_request",
            Self::Unauthenticated => "unauthenticated",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Forbidden => "access_denied",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::AlreadyDone => "already_done",
        }
    }

    #[must_use]
    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::Internal => "Unexpected error has occurred. Please try again later.",
            Self::InvalidRequest => "Invalid request",
            Self::Unauthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid credentials",
            Self::Forbidden => "Access denied",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::AlreadyDone => "Action already performed",
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict | Self::AlreadyDone => StatusCode::CONFLICT,
        }
    }
}
