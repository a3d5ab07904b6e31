use async_trait::async_trait;
use error_stack::Result;
use std::fmt::Debug;
use thiserror::Error;

use crate::model::{InsertPost, InsertUser, Post, PostId, UpdateUser, User};

mod memory;
mod mongo;
mod mutation;

pub use self::memory::MemoryStore;
pub use self::mongo::MongoStore;
pub use self::mutation::PostMutation;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store is not connected")]
    NotConnected,
    #[error("Document already exists")]
    DuplicateKey,
    #[error("Got a malformed document from the document store")]
    Malformed,
    #[error("Document store operation failed")]
    Operation,
}

/// Persistence seam for users and posts.
///
/// Every write on a single post is atomic. Mutations of nested
/// comments and replies go through [`DocumentStore::update_post`]
/// so they are never done as read, modify then write back.
#[async_trait]
pub trait DocumentStore: Debug + Send + Sync {
    /// Fails with [`StoreError::DuplicateKey`] if the handle is taken.
    async fn insert_user(&self, user: InsertUser<'_>) -> Result<User, StoreError>;

    async fn find_user(&self, handle: &str) -> Result<Option<User>, StoreError>;

    /// Returns the updated user or `None` if the user does not exist.
    async fn update_user(
        &self,
        handle: &str,
        update: UpdateUser<'_>,
    ) -> Result<Option<User>, StoreError>;

    async fn insert_post(&self, post: InsertPost<'_>) -> Result<Post, StoreError>;

    async fn find_post(&self, id: PostId) -> Result<Option<Post>, StoreError>;

    /// Lists posts from newest to oldest. Posts created at the same
    /// time are ordered by their identifier, also descending.
    async fn list_posts(&self, owner: Option<&str>) -> Result<Vec<Post>, StoreError>;

    /// Applies the mutation in one atomic step and returns the updated
    /// post. It returns `None` if the post does not exist or the guard
    /// of the mutation does not hold.
    async fn update_post(
        &self,
        id: PostId,
        mutation: PostMutation,
    ) -> Result<Option<Post>, StoreError>;

    /// Returns `false` if there is no post to delete.
    async fn delete_post(&self, id: PostId) -> Result<bool, StoreError>;
}
