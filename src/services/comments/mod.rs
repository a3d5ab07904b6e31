mod add;
mod delete;
mod like;

pub use self::add::AddComment;
pub use self::delete::DeleteComment;
pub use self::like::LikeComment;
