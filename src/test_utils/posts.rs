use crate::extract::SessionUser;
use crate::model::{Comment, CommentId, Post, PostId, Reply};
use crate::App;

#[bon::builder]
#[tracing::instrument(skip(app), name = "test_utils.posts.publish")]
pub async fn publish(app: &App, session_user: &SessionUser, content: Option<&str>) -> Post {
    let request = crate::services::posts::CreatePost {
        content: Some(content.unwrap_or("Hello, world!")),
        image: None,
    };

    request.perform(app, session_user).await.unwrap()
}

/// Comments on a post and returns the new comment.
#[bon::builder]
#[tracing::instrument(skip(app), name = "test_utils.posts.comment")]
pub async fn comment(
    app: &App,
    session_user: &SessionUser,
    post: PostId,
    text: Option<&str>,
) -> Comment {
    let request = crate::services::comments::AddComment {
        post_id: post,
        text: text.unwrap_or("Nice post!"),
    };

    let mut post = request.perform(app, session_user).await.unwrap();
    post.comments.pop().unwrap()
}

/// Replies to a comment and returns the new reply.
#[bon::builder]
#[tracing::instrument(skip(app), name = "test_utils.posts.reply")]
pub async fn reply(
    app: &App,
    session_user: &SessionUser,
    post: PostId,
    comment: CommentId,
    text: Option<&str>,
) -> Reply {
    let request = crate::services::replies::AddReply {
        post_id: post,
        comment_id: comment,
        text: text.unwrap_or("Thank you!"),
    };

    let mut post = request.perform(app, session_user).await.unwrap();
    post.comment_mut(comment)
        .and_then(|comment| comment.replies.pop())
        .unwrap()
}
