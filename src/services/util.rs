use tracing::warn;

use crate::config::Limits;
use crate::error::{ApiError, ErrorCategory};
use crate::extract::Upload;
use crate::media::Image;
use crate::model::{Post, PostId};
use crate::util::validation::char_len;
use crate::App;

pub fn post_not_found() -> ApiError {
    ApiError::new(ErrorCategory::NotFound).message("Post not found")
}

pub fn comment_not_found() -> ApiError {
    ApiError::new(ErrorCategory::NotFound).message("Comment not found")
}

pub fn reply_not_found() -> ApiError {
    ApiError::new(ErrorCategory::NotFound).message("Reply not found")
}

pub async fn load_post(app: &App, id: PostId) -> Result<Post, ApiError> {
    app.store.find_post(id).await?.ok_or_else(post_not_found)
}

/// Checks the content of a post.
///
/// The content must not be blank or have more characters than
/// what is allowed in the configuration.
pub fn check_post_content(limits: &Limits, content: &str) -> Result<(), ApiError> {
    if content.trim().is_empty() {
        return Err(ApiError::new(ErrorCategory::InvalidRequest)
            .message("Post content must not be empty"));
    }

    if char_len(content) > limits.post_max_characters {
        return Err(ApiError::new(ErrorCategory::InvalidRequest).message(format!(
            "Post content must not exceed {} characters",
            limits.post_max_characters
        )));
    }

    Ok(())
}

/// Checks the text of a comment or a reply.
pub fn check_comment_text(limits: &Limits, text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::new(ErrorCategory::InvalidRequest).message("Text must not be empty"));
    }

    if char_len(text) > limits.comment_max_characters {
        return Err(ApiError::new(ErrorCategory::InvalidRequest).message(format!(
            "Text must not exceed {} characters",
            limits.comment_max_characters
        )));
    }

    Ok(())
}

pub fn check_image(app: &App, upload: Upload) -> Result<Image, ApiError> {
    Image::validate(
        upload.bytes,
        upload.content_type.as_deref(),
        app.config.media.max_size,
    )
    .map_err(|error| ApiError::new(ErrorCategory::InvalidRequest).message(error.to_string()))
}

/// Deletes an image that no document refers to anymore. Failures
/// are only logged since the request has already failed or finished.
pub async fn discard_media(app: &App, url: &str) {
    if let Err(error) = app.media.delete(url).await {
        warn!(?error, %url, "Could not delete orphaned media file");
    }
}
