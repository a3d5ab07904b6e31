use crate::db::PostMutation;
use crate::error::ApiError;
use crate::extract::SessionUser;
use crate::model::{CommentId, InsertComment, Post, PostId};
use crate::services::util::{check_comment_text, comment_not_found, load_post};
use crate::App;

#[derive(Debug)]
pub struct AddReply<'a> {
    pub post_id: PostId,
    pub comment_id: CommentId,
    pub text: &'a str,
}

impl AddReply<'_> {
    #[tracing::instrument(skip_all, fields(
        post.id = %self.post_id,
        comment.id = %self.comment_id,
    ), name = "services.replies.add")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<Post, ApiError> {
        check_comment_text(&app.config.limits, self.text)?;

        let reply = InsertComment::builder()
            .author(&session_user.handle)
            .maybe_author_avatar(session_user.avatar.as_deref())
            .text(self.text)
            .build()
            .into_reply();

        let mutation = PostMutation::PushReply {
            comment: self.comment_id,
            reply,
        };

        if let Some(post) = app.store.update_post(self.post_id, mutation).await? {
            return Ok(post);
        }

        load_post(app, self.post_id).await?;
        Err(comment_not_found())
    }
}
