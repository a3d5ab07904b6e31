use crate::auth::jwt::{DecodeJwtError, LoginClaims};
use crate::error::{ApiError, ErrorCategory};
use crate::model::User;
use crate::util::Sensitive;
use crate::App;

/// Resolves the user behind an identity token.
#[derive(Debug)]
pub struct Authenticate<'a> {
    pub token: Sensitive<&'a str>,
}

impl Authenticate<'_> {
    #[tracing::instrument(skip_all, name = "services.users.authenticate")]
    pub async fn perform(self, app: &App) -> Result<User, ApiError> {
        let claims = match LoginClaims::decode(app, &self.token) {
            Ok(claims) => claims,
            Err(report) => {
                let error = match report.current_context() {
                    DecodeJwtError::Malformed => Some(
                        ApiError::new(ErrorCategory::Unauthenticated)
                            .message("Malformed identity token"),
                    ),
                    DecodeJwtError::Rejected => Some(
                        ApiError::new(ErrorCategory::Forbidden)
                            .message("Invalid or expired identity token"),
                    ),
                    DecodeJwtError::Unknown => None,
                };
                return Err(error.unwrap_or_else(|| ApiError::from_report(report)));
            }
        };

        match app.store.find_user(&claims.sub).await? {
            Some(user) => Ok(user),
            None => Err(ApiError::new(ErrorCategory::Forbidden)
                .message("User of this identity token no longer exists")),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_include;
    use chrono::{TimeDelta, Utc};
    use serde_json::json;

    use super::*;
    use crate::test_utils::{self, TestResultExt};

    #[tracing::instrument]
    #[tokio::test]
    async fn should_authenticate_logged_in_user() {
        let app = test_utils::build_test_app().await;
        let alice = test_utils::users::start_session()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        let request = Authenticate {
            token: Sensitive::new(&alice.token),
        };

        let user = request.perform(&app).await.unwrap();
        assert_eq!(user.handle, "alice");
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_reject_expired_token() {
        let app = test_utils::build_test_app().await;
        let alice = test_utils::users::register()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        // expired ten seconds ago
        let lifetime = TimeDelta::seconds(app.config.auth.token_lifetime_secs.try_into().unwrap());
        let issued_at = Utc::now() - lifetime - TimeDelta::seconds(10);
        let token = LoginClaims::generate(&app, &alice, Some(issued_at))
            .encode(&app)
            .unwrap();

        let request = Authenticate {
            token: Sensitive::new(&token),
        };

        let error = request.perform(&app).await.expect_error_json();
        assert_json_include!(
            actual: error,
            expected: json!({ "code": "access_denied" }),
        );
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_reject_malformed_token() {
        let app = test_utils::build_test_app().await;
        let request = Authenticate {
            token: Sensitive::new("hello.world"),
        };

        let error = request.perform(&app).await.expect_error_json();
        assert_json_include!(
            actual: error,
            expected: json!({ "code": "unauthenticated" }),
        );
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_reject_token_of_unknown_user() {
        let app = test_utils::build_test_app().await;
        let ghost = crate::model::InsertUser::builder()
            .handle("ghost")
            .password_hash("")
            .build()
            .into_user();

        let token = LoginClaims::generate(&app, &ghost, None)
            .encode(&app)
            .unwrap();

        let request = Authenticate {
            token: Sensitive::new(&token),
        };

        let error = request.perform(&app).await.expect_error_json();
        assert_json_include!(
            actual: error,
            expected: json!({ "code": "access_denied" }),
        );
    }
}
