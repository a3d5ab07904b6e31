use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::views::{ProfileView, UserView};
use crate::error::{ApiError, ErrorCategory};
use crate::extract::{Json, MultipartForm, SessionUser};
use crate::{services, App};

pub async fn local_profile(app: App, session_user: SessionUser) -> Result<Response, ApiError> {
    let request = services::users::GetProfile {
        handle: &session_user.handle,
    };

    let profile = request.perform(&app).await?;
    Ok(Json(ProfileView::from(profile)).into_response())
}

pub async fn public_profile(app: App, Path(handle): Path<String>) -> Result<Response, ApiError> {
    let request = services::users::GetProfile { handle: &handle };
    let profile = request.perform(&app).await?;
    Ok(Json(ProfileView::from(profile)).into_response())
}

pub async fn update_avatar(
    app: App,
    session_user: SessionUser,
    mut form: MultipartForm,
) -> Result<Response, ApiError> {
    let Some(image) = form.file("image") else {
        return Err(ApiError::new(ErrorCategory::InvalidRequest).message("Missing image field"));
    };

    let request = services::users::UpdateAvatar { image };
    let user = request.perform(&app, &session_user).await?;
    Ok(Json(UserView::from(user)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct UpdateBio {
    bio: String,
}

pub async fn update_bio(
    app: App,
    session_user: SessionUser,
    Json(form): Json<UpdateBio>,
) -> Result<Response, ApiError> {
    let request = services::users::UpdateBio { bio: &form.bio };
    let user = request.perform(&app, &session_user).await?;
    Ok(Json(UserView::from(user)).into_response())
}
