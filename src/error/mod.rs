use error_stack::{Context, Report};
use tracing_error::SpanTrace;

mod category;

pub use self::category::ErrorCategory;

/// Error type returned by every service operation and HTTP handler.
///
/// It only carries what the client is allowed to see. Internal failures
/// are logged (together with their error-stack report and span trace)
/// at the moment they are converted into an [`ApiError`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ApiError {
    pub category: ErrorCategory,
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(category: ErrorCategory) -> Self {
        Self {
            category,
            message: None,
        }
    }

    pub fn internal() -> Self {
        Self::new(ErrorCategory::Internal)
    }

    pub fn message(self, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Converts an internal error report into an [`ApiError`] with
    /// the [internal] category and logs it.
    ///
    /// [internal]: ErrorCategory::Internal
    #[track_caller]
    pub fn from_report<C: Context>(report: Report<C>) -> Self {
        let trace = SpanTrace::capture();
        tracing::error!(error = ?report, %trace, "Caught internal server error");
        Self::internal()
    }
}

impl ApiError {
    #[inline]
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.category.code()
    }

    #[must_use]
    pub fn message_or_default(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| self.category.default_message())
    }
}

impl PartialEq for ApiError {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category
    }
}

impl Eq for ApiError {}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message_or_default())
    }
}

impl std::error::Error for ApiError {}

impl<C: Context> From<Report<C>> for ApiError {
    #[track_caller]
    fn from(report: Report<C>) -> Self {
        Self::from_report(report)
    }
}

impl serde::Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        // Ordering of fields:
        // { "code": "not_found", "message": "Unknown post" }
        let mut state = serializer.serialize_struct("ApiError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", self.message_or_default())?;
        state.end()
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.category.status_code();
        (status, axum::Json(self)).into_response()
    }
}
