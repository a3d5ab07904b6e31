use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::views::{LoginView, MessageView};
use crate::error::ApiError;
use crate::extract::Json;
use crate::util::Sensitive;
use crate::{services, App};

#[derive(Debug, Deserialize)]
pub struct Credentials {
    handle: String,
    password: Sensitive<String>,
}

pub async fn register(app: App, Json(form): Json<Credentials>) -> Result<Response, ApiError> {
    let request = services::users::Register {
        handle: Sensitive::new(&form.handle),
        password: Sensitive::new(form.password.as_str()),
    };

    request.perform(&app).await?;
    let response = Json(MessageView {
        message: "User registered successfully",
    });

    Ok((StatusCode::CREATED, response).into_response())
}

pub async fn login(app: App, Json(form): Json<Credentials>) -> Result<Response, ApiError> {
    let request = services::users::Login {
        handle: Sensitive::new(&form.handle),
        password: Sensitive::new(form.password.as_str()),
    };

    let response = request.perform(&app).await?;
    let response = Json(LoginView {
        message: "Login successful",
        token: response.token.into_inner(),
        user: response.user.into(),
    });

    Ok(response.into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_utils;

    #[tracing::instrument]
    #[tokio::test]
    async fn should_register_user() {
        let app = test_utils::build_test_app().await;
        let server = test_utils::build_test_server(&app);

        let response = server
            .post("/register")
            .json(&json!({ "handle": "alice", "password": test_utils::DEFAULT_PASSWORD }))
            .await;

        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({ "message": "User registered successfully" }));
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_reject_missing_fields() {
        let app = test_utils::build_test_app().await;
        let server = test_utils::build_test_server(&app);

        let response = server
            .post("/register")
            .json(&json!({ "handle": "alice" }))
            .expect_failure()
            .await;

        response.assert_status_bad_request();
        response.assert_json_contains(&json!({ "code": "invalid_request" }));
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_login_user() {
        let app = test_utils::build_test_app().await;
        let server = test_utils::build_test_server(&app);
        test_utils::users::register()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        let response = server
            .post("/login")
            .json(&json!({ "handle": "alice", "password": test_utils::DEFAULT_PASSWORD }))
            .await;

        response.assert_status_ok();
        response.assert_json_contains(&json!({
            "message": "Login successful",
            "user": { "handle": "alice" },
        }));
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_reject_wrong_password() {
        let app = test_utils::build_test_app().await;
        let server = test_utils::build_test_server(&app);
        test_utils::users::register()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        let response = server
            .post("/login")
            .json(&json!({ "handle": "alice", "password": "hunter2hunter2" }))
            .expect_failure()
            .await;

        response.assert_status_unauthorized();
        response.assert_json_contains(&json!({ "code": "invalid_credentials" }));
    }
}
