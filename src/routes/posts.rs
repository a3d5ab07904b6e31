use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::parse_post_id;
use super::views::{MessageView, PostView};
use crate::error::ApiError;
use crate::extract::{Json, MultipartForm, SessionUser};
use crate::{services, App};

pub async fn feed(app: App, _session_user: SessionUser) -> Result<Response, ApiError> {
    let posts = services::posts::GetFeed
        .perform(&app)
        .await?
        .into_iter()
        .map(PostView::from)
        .collect::<Vec<_>>();

    Ok(Json(posts).into_response())
}

pub async fn create(
    app: App,
    session_user: SessionUser,
    mut form: MultipartForm,
) -> Result<Response, ApiError> {
    let content = form.text("content")?;
    let request = services::posts::CreatePost {
        content: content.as_deref(),
        image: form.file("image"),
    };

    let post = request.perform(&app, &session_user).await?;
    Ok((StatusCode::CREATED, Json(PostView::from(post))).into_response())
}

pub async fn get(
    app: App,
    _session_user: SessionUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let request = services::posts::GetPost {
        id: parse_post_id(&id)?,
    };

    let post = request.perform(&app).await?;
    Ok(Json(PostView::from(post)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct EditPost {
    content: String,
}

pub async fn edit(
    app: App,
    session_user: SessionUser,
    Path(id): Path<String>,
    Json(form): Json<EditPost>,
) -> Result<Response, ApiError> {
    let request = services::posts::EditPost {
        id: parse_post_id(&id)?,
        content: &form.content,
    };

    let post = request.perform(&app, &session_user).await?;
    Ok(Json(PostView::from(post)).into_response())
}

pub async fn delete(
    app: App,
    session_user: SessionUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let request = services::posts::DeletePost {
        id: parse_post_id(&id)?,
    };

    request.perform(&app, &session_user).await?;
    let response = Json(MessageView {
        message: "Post deleted successfully",
    });

    Ok(response.into_response())
}

pub async fn like(
    app: App,
    session_user: SessionUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let request = services::posts::LikePost {
        id: parse_post_id(&id)?,
    };

    let post = request.perform(&app, &session_user).await?;
    Ok(Json(PostView::from(post)).into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::json;

    use crate::media::tests::PNG;
    use crate::test_utils;

    #[tracing::instrument]
    #[tokio::test]
    async fn should_create_post_with_image() {
        let app = test_utils::build_test_app().await;
        let mut server = test_utils::build_test_server(&app);
        test_utils::users::override_credentials()
            .app(&app)
            .server(&mut server)
            .handle("alice")
            .call()
            .await;

        let form = MultipartForm::new()
            .add_text("content", "look at this")
            .add_part("image", Part::bytes(PNG.to_vec()).mime_type("image/png"));

        let response = server.post("/posts").multipart(form).await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["content"], "look at this");
        assert!(body["image"].as_str().unwrap().ends_with(".png"));
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_reject_empty_post() {
        let app = test_utils::build_test_app().await;
        let mut server = test_utils::build_test_server(&app);
        test_utils::users::override_credentials()
            .app(&app)
            .server(&mut server)
            .handle("alice")
            .call()
            .await;

        let response = server
            .post("/posts")
            .multipart(MultipartForm::new().add_text("content", ""))
            .expect_failure()
            .await;

        response.assert_status_bad_request();
        response.assert_json_contains(&json!({ "code": "invalid_request" }));
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_list_feed() {
        let app = test_utils::build_test_app().await;
        let mut server = test_utils::build_test_server(&app);
        let alice = test_utils::users::override_credentials()
            .app(&app)
            .server(&mut server)
            .handle("alice")
            .call()
            .await;

        let session_user = alice.get_session_user(&app).await;
        for content in ["first", "second"] {
            test_utils::posts::publish()
                .app(&app)
                .session_user(&session_user)
                .content(content)
                .call()
                .await;
        }

        let response = server.get("/feed").await;
        response.assert_status_ok();
        response.assert_json_contains(&json!([
            { "content": "second", "likesCount": 0 },
            { "content": "first", "likesCount": 0 },
        ]));
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_treat_malformed_id_as_not_found() {
        let app = test_utils::build_test_app().await;
        let mut server = test_utils::build_test_server(&app);
        test_utils::users::override_credentials()
            .app(&app)
            .server(&mut server)
            .handle("alice")
            .call()
            .await;

        let response = server.get("/posts/not-an-id").expect_failure().await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json_contains(&json!({ "code": "not_found" }));
    }

    #[tracing::instrument]
    #[tokio::test]
    async fn should_edit_like_and_delete_post() {
        let app = test_utils::build_test_app().await;
        let mut server = test_utils::build_test_server(&app);
        let alice = test_utils::users::override_credentials()
            .app(&app)
            .server(&mut server)
            .handle("alice")
            .call()
            .await;

        let session_user = alice.get_session_user(&app).await;
        let post = test_utils::posts::publish()
            .app(&app)
            .session_user(&session_user)
            .call()
            .await;

        let path = format!("/posts/{}", post.id);
        let response = server
            .put(&path)
            .json(&json!({ "content": "edited" }))
            .await;
        response.assert_status_ok();
        response.assert_json_contains(&json!({ "content": "edited" }));

        let response = server.post(&format!("{path}/like")).await;
        response.assert_status_ok();
        response.assert_json_contains(&json!({ "likesCount": 1, "likes": ["alice"] }));

        let response = server
            .post(&format!("{path}/like"))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::CONFLICT);
        response.assert_json_contains(&json!({ "code": "already_done" }));

        let response = server.delete(&path).await;
        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Post deleted successfully" }));

        let response = server.get(&path).expect_failure().await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}
