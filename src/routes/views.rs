//! JSON views of the stored documents as seen by clients.
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Comment, Post, Reply, User};
use crate::services::users::Profile;

#[derive(Debug, Serialize)]
pub struct MessageView {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginView {
    pub message: &'static str,
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub handle: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            handle: user.handle,
            avatar: user.avatar,
            bio: user.bio,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user: UserView,
    pub posts: Vec<PostView>,
}

impl From<Profile> for ProfileView {
    fn from(profile: Profile) -> Self {
        Self {
            user: profile.user.into(),
            posts: profile.posts.into_iter().map(PostView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    pub owner: String,
    pub owner_avatar: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub likes_count: i64,
    pub likes: Vec<String>,
    pub comments: Vec<CommentView>,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            owner: post.owner,
            owner_avatar: post.owner_avatar,
            content: post.content,
            image: post.image,
            likes_count: post.likes_count,
            likes: post.likes,
            comments: post.comments.into_iter().map(CommentView::from).collect(),
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub author: String,
    pub author_avatar: Option<String>,
    pub text: String,
    pub likes: Vec<String>,
    pub replies: Vec<ReplyView>,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            author: comment.author,
            author_avatar: comment.author_avatar,
            text: comment.text,
            likes: comment.likes,
            replies: comment.replies.into_iter().map(ReplyView::from).collect(),
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyView {
    pub id: String,
    pub author: String,
    pub author_avatar: Option<String>,
    pub text: String,
    pub likes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Reply> for ReplyView {
    fn from(reply: Reply) -> Self {
        Self {
            id: reply.id.to_string(),
            author: reply.author,
            author_avatar: reply.author_avatar,
            text: reply.text,
            likes: reply.likes,
            created_at: reply.created_at,
        }
    }
}
