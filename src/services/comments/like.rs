use crate::db::PostMutation;
use crate::error::{ApiError, ErrorCategory};
use crate::extract::SessionUser;
use crate::model::{CommentId, Post, PostId};
use crate::services::util::{comment_not_found, load_post};
use crate::App;

#[derive(Debug)]
pub struct LikeComment {
    pub post_id: PostId,
    pub comment_id: CommentId,
}

impl LikeComment {
    #[tracing::instrument(skip_all, fields(
        post.id = %self.post_id,
        comment.id = %self.comment_id,
    ), name = "services.comments.like")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<Post, ApiError> {
        let mutation = PostMutation::LikeComment {
            comment: self.comment_id,
            handle: session_user.handle.clone(),
        };

        if let Some(post) = app.store.update_post(self.post_id, mutation).await? {
            return Ok(post);
        }

        let post = load_post(app, self.post_id).await?;
        if post.comment(self.comment_id).is_none() {
            return Err(comment_not_found());
        }

        Err(ApiError::new(ErrorCategory::AlreadyDone).message("Comment already liked"))
    }
}
