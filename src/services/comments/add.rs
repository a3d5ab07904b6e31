use crate::db::PostMutation;
use crate::error::ApiError;
use crate::extract::SessionUser;
use crate::model::{InsertComment, Post, PostId};
use crate::services::util::{check_comment_text, post_not_found};
use crate::App;

#[derive(Debug)]
pub struct AddComment<'a> {
    pub post_id: PostId,
    pub text: &'a str,
}

impl AddComment<'_> {
    #[tracing::instrument(skip_all, fields(post.id = %self.post_id), name = "services.comments.add")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<Post, ApiError> {
        check_comment_text(&app.config.limits, self.text)?;

        let comment = InsertComment::builder()
            .author(&session_user.handle)
            .maybe_author_avatar(session_user.avatar.as_deref())
            .text(self.text)
            .build()
            .into_comment();

        app.store
            .update_post(self.post_id, PostMutation::PushComment(comment))
            .await?
            .ok_or_else(post_not_found)
    }
}
