use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::services::ServeDir;

use crate::error::{ApiError, ErrorCategory};
use crate::model::{CommentId, PostId, ReplyId};
use crate::services::util::{comment_not_found, post_not_found, reply_not_found};
use crate::App;

mod comments;
mod posts;
mod profile;
mod users;
mod views;

/// Builds the [axum router] of the Chirper API with every middleware
/// applied to it.
///
/// [axum router]: axum::Router
pub fn build_axum_router(app: App) -> Router {
    let config = app.config.clone();
    let media = ServeDir::new(&config.media.dir);

    let router = Router::new()
        .route("/register", post(self::users::register))
        .route("/login", post(self::users::login))
        .route("/profile", get(self::profile::local_profile))
        .route("/profile/avatar", post(self::profile::update_avatar))
        .route("/profile/bio", put(self::profile::update_bio))
        .route("/users/:handle", get(self::profile::public_profile))
        .route("/feed", get(self::posts::feed))
        .route("/posts", post(self::posts::create))
        .route(
            "/posts/:id",
            get(self::posts::get)
                .put(self::posts::edit)
                .delete(self::posts::delete),
        )
        .route("/posts/:id/like", post(self::posts::like))
        .route("/posts/:id/comments", post(self::comments::add_comment))
        .route(
            "/posts/:id/comments/:cid",
            delete(self::comments::delete_comment),
        )
        .route(
            "/posts/:id/comments/:cid/like",
            post(self::comments::like_comment),
        )
        .route(
            "/posts/:id/comments/:cid/replies",
            post(self::comments::add_reply),
        )
        .route(
            "/posts/:id/comments/:cid/replies/:rid",
            delete(self::comments::delete_reply),
        )
        .route(
            "/posts/:id/comments/:cid/replies/:rid/like",
            post(self::comments::like_reply),
        )
        .nest_service("/media", media)
        .fallback(not_found_route)
        .with_state(app);

    crate::middleware::apply(router, &config)
}

async fn not_found_route(method: Method) -> Response {
    match method {
        Method::HEAD => StatusCode::NOT_FOUND.into_response(),
        _ => ApiError::new(ErrorCategory::NotFound).into_response(),
    }
}

// Malformed identifiers cannot belong to anything stored.
fn parse_post_id(value: &str) -> Result<PostId, ApiError> {
    value.parse().map_err(|_| post_not_found())
}

fn parse_comment_id(value: &str) -> Result<CommentId, ApiError> {
    value.parse().map_err(|_| comment_not_found())
}

fn parse_reply_id(value: &str) -> Result<ReplyId, ApiError> {
    value.parse().map_err(|_| reply_not_found())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::multipart::MultipartForm;
    use serde_json::json;

    use crate::test_utils;

    #[tracing::instrument]
    #[tokio::test]
    async fn should_answer_unknown_routes_with_json() {
        let app = test_utils::build_test_app().await;
        let server = test_utils::build_test_server(&app);

        let response = server.get("/nothing/here").expect_failure().await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json_contains(&json!({ "code": "not_found" }));
    }

    /// The whole journey of a post through the API: alice posts, bob
    /// comments, alice likes the comment, carol cannot delete it but bob
    /// can.
    #[tracing::instrument]
    #[tokio::test]
    async fn should_go_through_the_post_lifecycle() {
        let app = test_utils::build_test_app().await;
        let mut server = test_utils::build_test_server(&app);

        let response = server
            .post("/register")
            .json(&json!({ "handle": "alice", "password": test_utils::DEFAULT_PASSWORD }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let response = server
            .post("/login")
            .json(&json!({ "handle": "alice", "password": test_utils::DEFAULT_PASSWORD }))
            .await;
        response.assert_status_ok();

        let token = response.json::<serde_json::Value>()["token"]
            .as_str()
            .unwrap()
            .to_string();
        test_utils::users::authorize(&mut server, &token);

        let response = server
            .post("/posts")
            .multipart(MultipartForm::new().add_text("content", "hi"))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.assert_json_contains(&json!({
            "owner": "alice",
            "content": "hi",
            "likesCount": 0,
            "comments": [],
        }));
        let post_id = response.json::<serde_json::Value>()["id"]
            .as_str()
            .unwrap()
            .to_string();

        let bob = test_utils::users::override_credentials()
            .app(&app)
            .server(&mut server)
            .handle("bob")
            .call()
            .await;

        let response = server
            .post(&format!("/posts/{post_id}/comments"))
            .json(&json!({ "text": "nice!" }))
            .await;
        response.assert_status_ok();
        let comment_id = response.json::<serde_json::Value>()["comments"][0]["id"]
            .as_str()
            .unwrap()
            .to_string();

        test_utils::users::authorize(&mut server, &token);
        let response = server
            .post(&format!("/posts/{post_id}/comments/{comment_id}/like"))
            .await;
        response.assert_status_ok();
        response.assert_json_contains(&json!({
            "comments": [{ "id": comment_id, "author": "bob", "likes": ["alice"] }],
        }));

        test_utils::users::override_credentials()
            .app(&app)
            .server(&mut server)
            .handle("carol")
            .call()
            .await;

        let response = server
            .delete(&format!("/posts/{post_id}/comments/{comment_id}"))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        response.assert_json_contains(&json!({ "code": "access_denied" }));

        test_utils::users::authorize(&mut server, &bob.token);
        let response = server
            .delete(&format!("/posts/{post_id}/comments/{comment_id}"))
            .await;
        response.assert_status_ok();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["comments"], json!([]));
    }
}
