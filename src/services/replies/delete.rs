use crate::db::PostMutation;
use crate::error::{ApiError, ErrorCategory};
use crate::extract::SessionUser;
use crate::model::{CommentId, Post, PostId, ReplyId};
use crate::services::util::{comment_not_found, load_post, reply_not_found};
use crate::App;

/// Deletes a reply of a comment.
///
/// Only the author of the reply or the owner of the post may delete
/// it. The author of the parent comment has no say over its replies.
#[derive(Debug)]
pub struct DeleteReply {
    pub post_id: PostId,
    pub comment_id: CommentId,
    pub reply_id: ReplyId,
}

impl DeleteReply {
    #[tracing::instrument(skip_all, fields(
        post.id = %self.post_id,
        comment.id = %self.comment_id,
        reply.id = %self.reply_id,
    ), name = "services.replies.delete")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<Post, ApiError> {
        let post = load_post(app, self.post_id).await?;
        let reply = post
            .comment(self.comment_id)
            .ok_or_else(comment_not_found)?
            .reply(self.reply_id)
            .ok_or_else(reply_not_found)?;

        let is_author = reply.author == session_user.handle;
        if !is_author && !post.is_owned_by(&session_user.handle) {
            return Err(ApiError::new(ErrorCategory::Forbidden)
                .message("You are not allowed to delete this reply"));
        }

        let mutation = PostMutation::PullReply {
            comment: self.comment_id,
            reply: self.reply_id,
        };

        app.store
            .update_post(self.post_id, mutation)
            .await?
            .ok_or_else(reply_not_found)
    }
}
