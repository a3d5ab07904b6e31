use crate::error::{ApiError, ErrorCategory};
use crate::extract::SessionUser;
use crate::model::PostId;
use crate::services::util::{discard_media, load_post, post_not_found};
use crate::App;

/// Deletes a post together with its comments and replies.
#[derive(Debug)]
pub struct DeletePost {
    pub id: PostId,
}

impl DeletePost {
    #[tracing::instrument(skip_all, fields(post.id = %self.id), name = "services.posts.delete")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<(), ApiError> {
        let post = load_post(app, self.id).await?;
        if !post.is_owned_by(&session_user.handle) {
            return Err(ApiError::new(ErrorCategory::Forbidden)
                .message("You are not allowed to delete this post"));
        }

        if !app.store.delete_post(self.id).await? {
            return Err(post_not_found());
        }

        if let Some(image) = post.image.as_deref() {
            discard_media(app, image).await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    use super::*;
    use crate::services::posts::GetFeed;
    use crate::services::users::GetProfile;
    use crate::test_utils::{self, TestResultExt};

    #[tracing::instrument]
    #[tokio::test]
    async fn should_delete_post_with_its_comments() {
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
            .call()
            .await;

        let comment = test_utils::posts::comment()
            .app(&app)
            .session_user(&bob)
            .post(post.id)
            .call()
            .await;

        test_utils::posts::reply()
            .app(&app)
            .session_user(&alice)
            .post(post.id)
            .comment(comment.id)
            .call()
            .await;

        DeletePost { id: post.id }
            .perform(&app, &alice)
            .await
            .unwrap();

        assert_eq!(app.store.find_post(post.id).await.unwrap(), None);
        assert!(GetFeed.perform(&app).await.unwrap().is_empty());

        let profile = GetProfile { handle: "alice" }.perform(&app).await.unwrap();
        assert!(profile.posts.is_empty());
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
            .call()
            .await;

        let error = DeletePost { id: post.id }
            .perform(&app, &bob)
            .await
            .expect_error_json();

        assert_json_include!(
            actual: error,
            expected: json!({ "code": "access_denied" }),
        );
        assert!(app.store.find_post(post.id).await.unwrap().is_some());
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
        let error = DeletePost { id: PostId::new() }
            .perform(&app, &session_user)
            .await
            .expect_error_json();

        assert_json_include!(
            actual: error,
            expected: json!({ "code": "not_found" }),
        );
    }
}
