use crate::db::PostMutation;
use crate::error::{ApiError, ErrorCategory};
use crate::extract::SessionUser;
use crate::model::{CommentId, Post, PostId};
use crate::services::util::{comment_not_found, load_post};
use crate::App;

/// Deletes a comment together with its replies.
///
/// Only the author of the comment or the owner of the post may
/// delete it.
#[derive(Debug)]
pub struct DeleteComment {
    pub post_id: PostId,
    pub comment_id: CommentId,
}

impl DeleteComment {
    #[tracing::instrument(skip_all, fields(
        post.id = %self.post_id,
        comment.id = %self.comment_id,
    ), name = "services.comments.delete")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<Post, ApiError> {
        let post = load_post(app, self.post_id).await?;
        let comment = post.comment(self.comment_id).ok_or_else(comment_not_found)?;

        let is_author = comment.author == session_user.handle;
        if !is_author && !post.is_owned_by(&session_user.handle) {
            return Err(ApiError::new(ErrorCategory::Forbidden)
                .message("You are not allowed to delete this comment"));
        }

        let mutation = PostMutation::PullComment {
            comment: self.comment_id,
        };

        app.store
            .update_post(self.post_id, mutation)
            .await?
            .ok_or_else(comment_not_found)
    }
}
