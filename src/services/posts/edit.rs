use crate::db::PostMutation;
use crate::error::{ApiError, ErrorCategory};
use crate::extract::SessionUser;
use crate::model::{Post, PostId};
use crate::services::util::{check_post_content, load_post, post_not_found};
use crate::App;

/// Overwrites the content of a post. Images cannot be edited.
#[derive(Debug)]
pub struct EditPost<'a> {
    pub id: PostId,
    pub content: &'a str,
}

impl EditPost<'_> {
    #[tracing::instrument(skip_all, fields(post.id = %self.id), name = "services.posts.edit")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<Post, ApiError> {
        let post = load_post(app, self.id).await?;
        if !post.is_owned_by(&session_user.handle) {
            return Err(ApiError::new(ErrorCategory::Forbidden)
                .message("You are not allowed to edit this post"));
        }

        check_post_content(&app.config.limits, self.content)?;

        let mutation = PostMutation::SetContent {
            content: self.content.to_string(),
        };

        // it can only be gone if someone deleted it in the meantime
        app.store
            .update_post(self.id, mutation)
            .await?
            .ok_or_else(post_not_found)
    }
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{self, TestResultExt};

    #[tracing::instrument]
    #[tokio::test]
    async fn should_edit_own_post() {
        let app = test_utils::build_test_app().await;
        let alice = test_utils::users::start_session()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        let session_user = alice.get_session_user(&app).await;
        let post = test_utils::posts::publish()
            .app(&app)
            .session_user(&session_user)
            .content("hi")
            .call()
            .await;

        let request = EditPost {
            id: post.id,
            content: "hello",
        };

        let edited = request.perform(&app, &session_user).await.unwrap();
        assert_eq!(edited.content.as_deref(), Some("hello"));
        assert_eq!(edited.created_at, post.created_at);
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_reject_if_not_the_owner() {
        let app = test_utils::build_test_app().await;
        let alice = test_utils::users::start_session()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        let bob = test_utils::users::start_session()
            .app(&app)
            .handle("bob")
            .call()
            .await;

        let alice = alice.get_session_user(&app).await;
        let bob = bob.get_session_user(&app).await;
        let post = test_utils::posts::publish()
            .app(&app)
            .session_user(&alice)
            .content("hi")
            .call()
            .await;

        // ownership is checked before the content
        let request = EditPost {
            id: post.id,
            content: "",
        };

        let error = request.perform(&app, &bob).await.expect_error_json();
        assert_json_include!(
            actual: error,
            expected: json!({ "code": "access_denied" }),
        );

        let stored = app.store.find_post(post.id).await.unwrap().unwrap();
        assert_eq!(stored.content.as_deref(), Some("hi"));
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_reject_empty_content() {
        let app = test_utils::build_test_app().await;
        let alice = test_utils::users::start_session()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        let session_user = alice.get_session_user(&app).await;
        let post = test_utils::posts::publish()
            .app(&app)
            .session_user(&session_user)
            .call()
            .await;

        let request = EditPost {
            id: post.id,
            content: "  ",
        };

        let error = request
            .perform(&app, &session_user)
            .await
            .expect_error_json();

        assert_json_include!(
            actual: error,
            expected: json!({ "code": "invalid_request" }),
        );
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_reject_unknown_post() {
        let app = test_utils::build_test_app().await;
        let alice = test_utils::users::start_session()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        let session_user = alice.get_session_user(&app).await;
        let request = EditPost {
            id: PostId::new(),
            content: "hello",
        };

        let error = request
            .perform(&app, &session_user)
            .await
            .expect_error_json();

        assert_json_include!(
            actual: error,
            expected: json!({ "code": "not_found" }),
        );
    }
}
