pub mod comments;
pub mod posts;
pub mod replies;
pub mod users;
pub mod util;
