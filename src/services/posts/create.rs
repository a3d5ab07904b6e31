use crate::error::{ApiError, ErrorCategory};
use crate::extract::{SessionUser, Upload};
use crate::model::{InsertPost, Post};
use crate::services::util::{check_image, check_post_content, discard_media};
use crate::App;

#[derive(Debug)]
pub struct CreatePost<'a> {
    /// Blank content is treated as if there is no content at all.
    pub content: Option<&'a str>,
    pub image: Option<Upload>,
}

impl CreatePost<'_> {
    #[tracing::instrument(skip_all, name = "services.posts.create")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<Post, ApiError> {
        let content = self.content.filter(|v| !v.trim().is_empty());
        if content.is_none() && self.image.is_none() {
            return Err(ApiError::new(ErrorCategory::InvalidRequest)
                .message("Post must have a content or an image"));
        }

        if let Some(content) = content {
            check_post_content(&app.config.limits, content)?;
        }

        let image = self
            .image
            .map(|upload| check_image(app, upload))
            .transpose()?;

        let image_url = match image {
            Some(image) => Some(app.media.store(&image).await?),
            None => None,
        };

        let post = InsertPost::builder()
            .owner(&session_user.handle)
            .maybe_owner_avatar(session_user.avatar.as_deref())
            .maybe_content(content)
            .maybe_image(image_url.as_deref())
            .build();

        match app.store.insert_post(post).await {
            Ok(post) => Ok(post),
            Err(report) => {
                if let Some(url) = image_url.as_deref() {
                    discard_media(app, url).await;
                }
                Err(report.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_include;
    use bytes::Bytes;
    use serde_json::json;

    use super::*;
    use crate::media::tests::PNG;
    use crate::test_utils::{self, TestResultExt};

    #[tracing::instrument]
    #[tokio::test]
    async fn should_create_post() {
        let app = test_utils::build_test_app().await;
        let alice = test_utils::users::start_session()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        let session_user = alice.get_session_user(&app).await;
        let request = CreatePost {
            content: Some("hi"),
            image: None,
        };

        let post = request.perform(&app, &session_user).await.unwrap();
        assert_eq!(post.owner, "alice");
        assert_eq!(post.content.as_deref(), Some("hi"));
        assert_eq!(post.image, None);
        assert_eq!(post.likes_count, 0);
        assert!(post.likes.is_empty());
        assert!(post.comments.is_empty());

        let stored = app.store.find_post(post.id).await.unwrap();
        assert_eq!(stored, Some(post));
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_create_post_with_image_only() {
        let app = test_utils::build_test_app().await;
        let alice = test_utils::users::start_session()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        let session_user = alice.get_session_user(&app).await;
        let request = CreatePost {
            content: Some("   "),
            image: Some(Upload {
                bytes: Bytes::from_static(PNG),
                content_type: Some("image/png".into()),
            }),
        };

        let post = request.perform(&app, &session_user).await.unwrap();
        assert_eq!(post.content, None);

        let image = post.image.unwrap();
        assert!(image.starts_with("/media/"));
        assert!(image.ends_with(".png"));
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_snapshot_owner_avatar() {
        let app = test_utils::build_test_app().await;
        let alice = test_utils::users::start_session()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        let update = crate::model::UpdateUser::builder()
            .avatar("/media/alice.png")
            .build();
        app.store.update_user("alice", update).await.unwrap();

        let session_user = alice.get_session_user(&app).await;
        let post = test_utils::posts::publish()
            .app(&app)
            .session_user(&session_user)
            .call()
            .await;

        assert_eq!(post.owner_avatar.as_deref(), Some("/media/alice.png"));
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_reject_if_nothing_to_post() {
        let app = test_utils::build_test_app().await;
        let alice = test_utils::users::start_session()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        let session_user = alice.get_session_user(&app).await;
        let request = CreatePost {
            content: Some(""),
            image: None,
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
    async fn should_reject_if_content_is_too_long() {
        let app = test_utils::build_test_app().await;
        let alice = test_utils::users::start_session()
            .app(&app)
            .handle("alice")
            .call()
            .await;

        let session_user = alice.get_session_user(&app).await;
        let content = "a".repeat(app.config.limits.post_max_characters + 1);
        let request = CreatePost {
            content: Some(&content),
            image: None,
        };

        let error = request
            .perform(&app, &session_user)
            .await
            .expect_error_json();

        assert_json_include!(
            actual: error,
            expected: json!({ "code": "invalid_request" }),
        );
        assert!(app.store.list_posts(None).await.unwrap().is_empty());
    }
}
