use crate::model::{Comment, CommentId, Post, Reply, ReplyId};

/// A single targeted change on a post document.
///
/// Mutations that add a like carry a guard: the handle must not be
/// in the like list yet. Mutations on a comment or reply require the
/// addressed comment or reply to exist.
#[derive(Debug, Clone, PartialEq)]
pub enum PostMutation {
    SetContent {
        content: String,
    },
    Like {
        handle: String,
    },
    PushComment(Comment),
    LikeComment {
        comment: CommentId,
        handle: String,
    },
    PullComment {
        comment: CommentId,
    },
    PushReply {
        comment: CommentId,
        reply: Reply,
    },
    LikeReply {
        comment: CommentId,
        reply: ReplyId,
        handle: String,
    },
    PullReply {
        comment: CommentId,
        reply: ReplyId,
    },
}

impl PostMutation {
    /// Applies the mutation on an in-memory post. The post is left
    /// untouched and `false` is returned if the guard does not hold.
    pub fn apply(self, post: &mut Post) -> bool {
        match self {
            Self::SetContent { content } => {
                post.content = Some(content);
                true
            }
            Self::Like { handle } => {
                if post.likes.contains(&handle) {
                    return false;
                }
                post.likes.push(handle);
                post.likes_count += 1;
                true
            }
            Self::PushComment(comment) => {
                post.comments.push(comment);
                true
            }
            Self::LikeComment { comment, handle } => match post.comment_mut(comment) {
                Some(comment) if !comment.likes.contains(&handle) => {
                    comment.likes.push(handle);
                    true
                }
                _ => false,
            },
            Self::PullComment { comment } => {
                let len = post.comments.len();
                post.comments.retain(|v| v.id != comment);
                post.comments.len() != len
            }
            Self::PushReply { comment, reply } => match post.comment_mut(comment) {
                Some(comment) => {
                    comment.replies.push(reply);
                    true
                }
                None => false,
            },
            Self::LikeReply {
                comment,
                reply,
                handle,
            } => match post
                .comment_mut(comment)
                .and_then(|comment| comment.reply_mut(reply))
            {
                Some(reply) if !reply.likes.contains(&handle) => {
                    reply.likes.push(handle);
                    true
                }
                _ => false,
            },
            Self::PullReply { comment, reply } => match post.comment_mut(comment) {
                Some(comment) => {
                    let len = comment.replies.len();
                    comment.replies.retain(|v| v.id != reply);
                    comment.replies.len() != len
                }
                None => false,
            },
        }
    }
}
