use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use error_stack::Report;

use crate::error::{ApiError, ErrorCategory};

/// JSON body extractor and response.
///
/// Unlike [`axum::Json`], a body that cannot be read is rejected with
/// an `invalid_request` error in the usual `{code, message}` shape.
#[derive(Debug)]
pub struct Json<T>(pub T);

impl<T: serde::Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[axum::async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        axum::Json::<T>::from_request(req, state)
            .await
            .map(|axum::Json(value)| Self(value))
            .map_err(reject)
    }
}

fn reject(rejection: JsonRejection) -> ApiError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(..) => {
            Some("Expected request with `Content-Type: application/json`".to_string())
        }
        JsonRejection::JsonDataError(..)
        | JsonRejection::JsonSyntaxError(..)
        | JsonRejection::BytesRejection(..) => Some(rejection.body_text()),
        _ => None,
    };

    match message {
        Some(message) => ApiError::new(ErrorCategory::InvalidRequest).message(message),
        None => {
            tracing::warn!(?rejection, "unexpected JSON rejection");
            ApiError::from_report(Report::new(rejection))
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    use crate::test_utils;

    #[tracing::instrument]
    #[tokio::test]
    async fn should_reject_mistyped_body() {
        let app = test_utils::build_test_app().await;
        let server = test_utils::build_test_server(&app);

        let response = server
            .post("/register")
            .json(&json!({ "handle": 5, "password": ["x"] }))
            .expect_failure()
            .await;

        response.assert_status_bad_request();
        assert_json_include!(
            actual: response.json::<serde_json::Value>(),
            expected: json!({ "code": "invalid_request" }),
        );
    }
}
