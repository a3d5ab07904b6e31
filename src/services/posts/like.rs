use crate::db::PostMutation;
use crate::error::{ApiError, ErrorCategory};
use crate::extract::SessionUser;
use crate::model::{Post, PostId};
use crate::services::util::load_post;
use crate::App;

#[derive(Debug)]
pub struct LikePost {
    pub id: PostId,
}

impl LikePost {
    #[tracing::instrument(skip_all, fields(post.id = %self.id), name = "services.posts.like")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<Post, ApiError> {
        let mutation = PostMutation::Like {
            handle: session_user.handle.clone(),
        };

        if let Some(post) = app.store.update_post(self.id, mutation).await? {
            return Ok(post);
        }

        // The guard did not hold. Either the post is gone or the
        // user already liked it.
        load_post(app, self.id).await?;
        Err(ApiError::new(ErrorCategory::AlreadyDone).message("Post already liked"))
    }
}
