use async_trait::async_trait;
use error_stack::{Report, Result};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::trace;

use super::{DocumentStore, PostMutation, StoreError};
use crate::model::{InsertPost, InsertUser, Post, PostId, UpdateUser, User};

/// Document store that lives in the process memory.
///
/// Every write holds the write lock of its collection for the whole
/// operation which makes each of them atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    posts: RwLock<BTreeMap<PostId, Post>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    #[tracing::instrument(skip_all, name = "db.memory.insert_user")]
    async fn insert_user(&self, user: InsertUser<'_>) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.handle) {
            return Err(Report::new(StoreError::DuplicateKey)
                .attach_printable(format!("user {:?} already exists", user.handle)));
        }

        let user = user.into_user();
        users.insert(user.handle.clone(), user.clone());
        Ok(user)
    }

    #[tracing::instrument(skip(self), name = "db.memory.find_user")]
    async fn find_user(&self, handle: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(handle).cloned())
    }

    #[tracing::instrument(skip(self), name = "db.memory.update_user")]
    async fn update_user(
        &self,
        handle: &str,
        update: UpdateUser<'_>,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(handle).map(|user| {
            update.apply(user);
            user.clone()
        }))
    }

    #[tracing::instrument(skip_all, name = "db.memory.insert_post")]
    async fn insert_post(&self, post: InsertPost<'_>) -> Result<Post, StoreError> {
        let post = post.into_post();
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    #[tracing::instrument(skip(self), name = "db.memory.find_post")]
    async fn find_post(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    #[tracing::instrument(skip(self), name = "db.memory.list_posts")]
    async fn list_posts(&self, owner: Option<&str>) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().await;
        let mut posts = posts
            .values()
            .filter(|post| owner.map_or(true, |owner| post.is_owned_by(owner)))
            .cloned()
            .collect::<Vec<_>>();

        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(posts)
    }

    #[tracing::instrument(skip(self), name = "db.memory.update_post")]
    async fn update_post(
        &self,
        id: PostId,
        mutation: PostMutation,
    ) -> Result<Option<Post>, StoreError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.get_mut(&id) else {
            return Ok(None);
        };

        if mutation.apply(post) {
            Ok(Some(post.clone()))
        } else {
            trace!("mutation guard did not hold");
            Ok(None)
        }
    }

    #[tracing::instrument(skip(self), name = "db.memory.delete_post")]
    async fn delete_post(&self, id: PostId) -> Result<bool, StoreError> {
        Ok(self.posts.write().await.remove(&id).is_some())
    }
}
