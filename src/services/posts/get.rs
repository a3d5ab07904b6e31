use crate::error::ApiError;
use crate::model::{Post, PostId};
use crate::services::util::load_post;
use crate::App;

#[derive(Debug)]
pub struct GetPost {
    pub id: PostId,
}

impl GetPost {
    #[tracing::instrument(skip(app), name = "services.posts.get")]
    pub async fn perform(self, app: &App) -> Result<Post, ApiError> {
        load_post(app, self.id).await
    }
}

/// Gets every post from newest to oldest.
#[derive(Debug)]
pub struct GetFeed;

impl GetFeed {
    #[tracing::instrument(skip_all, name = "services.posts.feed")]
    pub async fn perform(self, app: &App) -> Result<Vec<Post>, ApiError> {
        let posts = app.store.list_posts(None).await?;
        Ok(posts)
    }
}
