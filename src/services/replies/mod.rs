mod add;
mod delete;
mod like;

pub use self::add::AddReply;
pub use self::delete::DeleteReply;
pub use self::like::LikeReply;
