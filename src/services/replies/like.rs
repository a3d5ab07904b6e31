use crate::db::PostMutation;
use crate::error::{ApiError, ErrorCategory};
use crate::extract::SessionUser;
use crate::model::{CommentId, Post, PostId, ReplyId};
use crate::services::util::{comment_not_found, load_post, reply_not_found};
use crate::App;

#[derive(Debug)]
pub struct LikeReply {
    pub post_id: PostId,
    pub comment_id: CommentId,
    pub reply_id: ReplyId,
}

impl LikeReply {
    #[tracing::instrument(skip_all, fields(
        post.id = %self.post_id,
        comment.id = %self.comment_id,
        reply.id = %self.reply_id,
    ), name = "services.replies.like")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<Post, ApiError> {
        let mutation = PostMutation::LikeReply {
            comment: self.comment_id,
            reply: self.reply_id,
            handle: session_user.handle.clone(),
        };

        if let Some(post) = app.store.update_post(self.post_id, mutation).await? {
            return Ok(post);
        }

        let post = load_post(app, self.post_id).await?;
        let comment = post.comment(self.comment_id).ok_or_else(comment_not_found)?;
        if comment.reply(self.reply_id).is_none() {
            return Err(reply_not_found());
        }

        Err(ApiError::new(ErrorCategory::AlreadyDone).message("Reply already liked"))
    }
}
