mod create;
mod delete;
mod edit;
mod get;
mod like;

pub use self::create::CreatePost;
pub use self::delete::DeletePost;
pub use self::edit::EditPost;
pub use self::get::{GetFeed, GetPost};
pub use self::like::LikePost;
