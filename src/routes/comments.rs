//! Handlers of comments and their replies.
use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::views::PostView;
use super::{parse_comment_id, parse_post_id, parse_reply_id};
use crate::error::ApiError;
use crate::extract::{Json, SessionUser};
use crate::{services, App};

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    text: String,
}

fn post_view(post: crate::model::Post) -> Response {
    Json(PostView::from(post)).into_response()
}

pub async fn add_comment(
    app: App,
    session_user: SessionUser,
    Path(id): Path<String>,
    Json(form): Json<CommentForm>,
) -> Result<Response, ApiError> {
    let request = services::comments::AddComment {
        post_id: parse_post_id(&id)?,
        text: &form.text,
    };

    request.perform(&app, &session_user).await.map(post_view)
}

pub async fn like_comment(
    app: App,
    session_user: SessionUser,
    Path((id, cid)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let request = services::comments::LikeComment {
        post_id: parse_post_id(&id)?,
        comment_id: parse_comment_id(&cid)?,
    };

    request.perform(&app, &session_user).await.map(post_view)
}

pub async fn delete_comment(
    app: App,
    session_user: SessionUser,
    Path((id, cid)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let request = services::comments::DeleteComment {
        post_id: parse_post_id(&id)?,
        comment_id: parse_comment_id(&cid)?,
    };

    request.perform(&app, &session_user).await.map(post_view)
}

pub async fn add_reply(
    app: App,
    session_user: SessionUser,
    Path((id, cid)): Path<(String, String)>,
    Json(form): Json<CommentForm>,
) -> Result<Response, ApiError> {
    let request = services::replies::AddReply {
        post_id: parse_post_id(&id)?,
        comment_id: parse_comment_id(&cid)?,
        text: &form.text,
    };

    request.perform(&app, &session_user).await.map(post_view)
}

pub async fn like_reply(
    app: App,
    session_user: SessionUser,
    Path((id, cid, rid)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    let request = services::replies::LikeReply {
        post_id: parse_post_id(&id)?,
        comment_id: parse_comment_id(&cid)?,
        reply_id: parse_reply_id(&rid)?,
    };

    request.perform(&app, &session_user).await.map(post_view)
}

pub async fn delete_reply(
    app: App,
    session_user: SessionUser,
    Path((id, cid, rid)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    let request = services::replies::DeleteReply {
        post_id: parse_post_id(&id)?,
        comment_id: parse_comment_id(&cid)?,
        reply_id: parse_reply_id(&rid)?,
    };

    request.perform(&app, &session_user).await.map(post_view)
}
