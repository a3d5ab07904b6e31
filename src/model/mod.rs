use chrono::{DateTime, Utc};

pub mod id;
pub mod post;
pub mod user;

pub use self::id::{CommentId, PostId, ReplyId};
pub use self::post::{Comment, InsertComment, InsertPost, Post, Reply};
pub use self::user::{InsertUser, UpdateUser, User};

/// Current time truncated to milliseconds since that is the most
/// precise timestamp the document store can keep.
#[must_use]
pub(crate) fn now() -> DateTime<Utc> {
    bson::DateTime::now().to_chrono()
}
