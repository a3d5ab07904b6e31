mod json;
mod multipart;
mod session_user;

pub use self::json::Json;
pub use self::multipart::{MultipartForm, Upload};
pub use self::session_user::SessionUser;
