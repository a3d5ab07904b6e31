use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CommentId, PostId, ReplyId};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: PostId,
    pub owner: String,
    /// Avatar of the owner at the time the post was created.
    #[serde(default)]
    pub owner_avatar: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Always equal to the length of `likes`.
    pub likes_count: i64,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    #[must_use]
    pub fn is_owned_by(&self, handle: &str) -> bool {
        self.owner == handle
    }

    #[must_use]
    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|v| v.id == id)
    }

    pub fn comment_mut(&mut self, id: CommentId) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|v| v.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    #[serde(default)]
    pub author_avatar: Option<String>,
    pub text: String,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub replies: Vec<Reply>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    #[must_use]
    pub fn reply(&self, id: ReplyId) -> Option<&Reply> {
        self.replies.iter().find(|v| v.id == id)
    }

    pub fn reply_mut(&mut self, id: ReplyId) -> Option<&mut Reply> {
        self.replies.iter_mut().find(|v| v.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Reply {
    pub id: ReplyId,
    pub author: String,
    #[serde(default)]
    pub author_avatar: Option<String>,
    pub text: String,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Builder)]
pub struct InsertPost<'a> {
    pub owner: &'a str,
    pub owner_avatar: Option<&'a str>,
    pub content: Option<&'a str>,
    pub image: Option<&'a str>,
}

impl InsertPost<'_> {
    /// Assigns a fresh identifier to the post.
    #[must_use]
    pub fn into_post(self) -> Post {
        Post {
            id: PostId::new(),
            owner: self.owner.to_string(),
            owner_avatar: self.owner_avatar.map(ToString::to_string),
            content: self.content.map(ToString::to_string),
            image: self.image.map(ToString::to_string),
            likes_count: 0,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: super::now(),
        }
    }
}

#[derive(Builder)]
pub struct InsertComment<'a> {
    pub author: &'a str,
    pub author_avatar: Option<&'a str>,
    pub text: &'a str,
}

impl InsertComment<'_> {
    #[must_use]
    pub fn into_comment(self) -> Comment {
        Comment {
            id: CommentId::new(),
            author: self.author.to_string(),
            author_avatar: self.author_avatar.map(ToString::to_string),
            text: self.text.to_string(),
            likes: Vec::new(),
            replies: Vec::new(),
            created_at: super::now(),
        }
    }

    #[must_use]
    pub fn into_reply(self) -> Reply {
        Reply {
            id: ReplyId::new(),
            author: self.author.to_string(),
            author_avatar: self.author_avatar.map(ToString::to_string),
            text: self.text.to_string(),
            likes: Vec::new(),
            created_at: super::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_bson() {
        let mut post = InsertPost::builder()
            .owner("alice")
            .content("hi")
            .build()
            .into_post();

        let mut comment = InsertComment::builder()
            .author("bob")
            .text("nice!")
            .build()
            .into_comment();

        comment.replies.push(
            InsertComment::builder()
                .author("alice")
                .text("thanks")
                .build()
                .into_reply(),
        );
        post.comments.push(comment);

        let document = bson::to_document(&post).unwrap();
        assert!(document.get_object_id("_id").is_ok());
        assert!(document.get_datetime("created_at").is_ok());
        assert_eq!(document.get_i64("likes_count").unwrap(), 0);

        let decoded: Post = bson::from_document(document).unwrap();
        assert_eq!(decoded, post);
    }
}
