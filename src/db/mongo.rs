use async_trait::async_trait;
use bson::{doc, Document};
use error_stack::{Report, Result, ResultExt};
use futures::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{
    ClientOptions, FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument,
};
use mongodb::{Client, Collection, IndexModel};
use std::time::Duration;
use tracing::{debug, trace};

use super::{DocumentStore, PostMutation, StoreError};
use crate::config;
use crate::model::{InsertPost, InsertUser, Post, PostId, UpdateUser, User};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Document store backed by a MongoDB deployment.
#[derive(Debug, Clone)]
pub struct MongoStore {
    users: Collection<User>,
    posts: Collection<Post>,
}

impl MongoStore {
    /// Connects to the MongoDB deployment and makes sure that it is
    /// reachable before the server starts accepting requests.
    #[tracing::instrument(skip_all, name = "db.mongo.connect")]
    pub async fn connect(config: &config::Database) -> Result<Self, StoreError> {
        let Some(url) = config.url.as_ref() else {
            return Err(Report::new(StoreError::NotConnected)
                .attach_printable("database.url is not set"));
        };

        let timeout = Duration::from_secs(config.timeout_secs.get());
        let mut options = ClientOptions::parse(url.as_str())
            .await
            .change_context(StoreError::NotConnected)
            .attach_printable("could not parse database.url")?;

        options.app_name = Some("chirper".into());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options).change_context(StoreError::NotConnected)?;
        let database = client.database(&config.name);

        debug!("pinging database...");
        database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(into_report)
            .attach_printable("could not ping the database")?;

        let this = Self {
            users: database.collection("users"),
            posts: database.collection("posts"),
        };
        this.create_indexes().await?;

        Ok(this)
    }

    async fn create_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "owner": 1, "created_at": -1, "_id": -1 })
            .options(IndexOptions::builder().name("owner_feed".to_string()).build())
            .build();

        self.posts
            .create_index(index, None)
            .await
            .map_err(into_report)
            .attach_printable("could not create posts index")?;

        Ok(())
    }
}

fn into_report(error: mongodb::error::Error) -> Report<StoreError> {
    let context = match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. } => StoreError::NotConnected,
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE => {
            StoreError::DuplicateKey
        }
        ErrorKind::BsonDeserialization(..) => StoreError::Malformed,
        _ => StoreError::Operation,
    };
    Report::new(error).change_context(context)
}

fn sort_newest_first() -> Document {
    doc! { "created_at": -1, "_id": -1 }
}

/// A filter with its guard and an update for `findOneAndUpdate`.
#[derive(Debug, PartialEq)]
struct TargetedUpdate {
    filter: Document,
    update: Document,
    array_filters: Option<Vec<Document>>,
}

impl TargetedUpdate {
    fn new(filter: Document, update: Document) -> Self {
        Self {
            filter,
            update,
            array_filters: None,
        }
    }
}

impl PostMutation {
    fn into_targeted_update(self, id: PostId) -> Result<TargetedUpdate, StoreError> {
        let update = match self {
            Self::SetContent { content } => {
                TargetedUpdate::new(doc! { "_id": id }, doc! { "$set": { "content": content } })
            }
            Self::Like { handle } => TargetedUpdate::new(
                doc! { "_id": id, "likes": { "$ne": &handle } },
                doc! {
                    "$push": { "likes": &handle },
                    "$inc": { "likes_count": 1_i64 },
                },
            ),
            Self::PushComment(comment) => {
                let comment = bson::to_bson(&comment)
                    .change_context(StoreError::Malformed)
                    .attach_printable("could not serialize comment")?;

                TargetedUpdate::new(doc! { "_id": id }, doc! { "$push": { "comments": comment } })
            }
            Self::LikeComment { comment, handle } => TargetedUpdate::new(
                doc! {
                    "_id": id,
                    "comments": { "$elemMatch": { "id": comment, "likes": { "$ne": &handle } } },
                },
                doc! { "$push": { "comments.$.likes": &handle } },
            ),
            Self::PullComment { comment } => TargetedUpdate::new(
                doc! { "_id": id, "comments.id": comment },
                doc! { "$pull": { "comments": { "id": comment } } },
            ),
            Self::PushReply { comment, reply } => {
                let reply = bson::to_bson(&reply)
                    .change_context(StoreError::Malformed)
                    .attach_printable("could not serialize reply")?;

                TargetedUpdate::new(
                    doc! { "_id": id, "comments.id": comment },
                    doc! { "$push": { "comments.$.replies": reply } },
                )
            }
            Self::LikeReply {
                comment,
                reply,
                handle,
            } => TargetedUpdate {
                filter: doc! {
                    "_id": id,
                    "comments": {
                        "$elemMatch": {
                            "id": comment,
                            "replies": { "$elemMatch": { "id": reply, "likes": { "$ne": &handle } } },
                        },
                    },
                },
                update: doc! { "$push": { "comments.$[c].replies.$[r].likes": &handle } },
                array_filters: Some(vec![doc! { "c.id": comment }, doc! { "r.id": reply }]),
            },
            Self::PullReply { comment, reply } => TargetedUpdate::new(
                doc! {
                    "_id": id,
                    "comments": { "$elemMatch": { "id": comment, "replies.id": reply } },
                },
                doc! { "$pull": { "comments.$.replies": { "id": reply } } },
            ),
        };
        Ok(update)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    #[tracing::instrument(skip_all, name = "db.mongo.insert_user")]
    async fn insert_user(&self, user: InsertUser<'_>) -> Result<User, StoreError> {
        let user = user.into_user();
        self.users.insert_one(&user, None).await.map_err(into_report)?;
        Ok(user)
    }

    #[tracing::instrument(skip(self), name = "db.mongo.find_user")]
    async fn find_user(&self, handle: &str) -> Result<Option<User>, StoreError> {
        self.users
            .find_one(doc! { "_id": handle }, None)
            .await
            .map_err(into_report)
    }

    #[tracing::instrument(skip(self), name = "db.mongo.update_user")]
    async fn update_user(
        &self,
        handle: &str,
        update: UpdateUser<'_>,
    ) -> Result<Option<User>, StoreError> {
        let mut set = Document::new();
        if let Some(avatar) = update.avatar {
            set.insert("avatar", avatar);
        }
        if let Some(bio) = update.bio {
            set.insert("bio", bio);
        }

        if set.is_empty() {
            return self.find_user(handle).await;
        }

        let mut options = FindOneAndUpdateOptions::default();
        options.return_document = Some(ReturnDocument::After);

        self.users
            .find_one_and_update(doc! { "_id": handle }, doc! { "$set": set }, options)
            .await
            .map_err(into_report)
    }

    #[tracing::instrument(skip_all, name = "db.mongo.insert_post")]
    async fn insert_post(&self, post: InsertPost<'_>) -> Result<Post, StoreError> {
        let post = post.into_post();
        self.posts.insert_one(&post, None).await.map_err(into_report)?;
        Ok(post)
    }

    #[tracing::instrument(skip(self), name = "db.mongo.find_post")]
    async fn find_post(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        self.posts
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(into_report)
    }

    #[tracing::instrument(skip(self), name = "db.mongo.list_posts")]
    async fn list_posts(&self, owner: Option<&str>) -> Result<Vec<Post>, StoreError> {
        let filter = owner.map(|owner| doc! { "owner": owner });
        let options = FindOptions::builder().sort(sort_newest_first()).build();

        let cursor = self.posts.find(filter, options).await.map_err(into_report)?;
        cursor.try_collect().await.map_err(into_report)
    }

    #[tracing::instrument(skip(self), name = "db.mongo.update_post")]
    async fn update_post(
        &self,
        id: PostId,
        mutation: PostMutation,
    ) -> Result<Option<Post>, StoreError> {
        let TargetedUpdate {
            filter,
            update,
            array_filters,
        } = mutation.into_targeted_update(id)?;

        trace!(?filter, ?update, "updating post");

        let mut options = FindOneAndUpdateOptions::default();
        options.return_document = Some(ReturnDocument::After);
        options.array_filters = array_filters;

        self.posts
            .find_one_and_update(filter, update, options)
            .await
            .map_err(into_report)
    }

    #[tracing::instrument(skip(self), name = "db.mongo.delete_post")]
    async fn delete_post(&self, id: PostId) -> Result<bool, StoreError> {
        let result = self
            .posts
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(into_report)?;

        Ok(result.deleted_count > 0)
    }
}
