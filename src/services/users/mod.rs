mod authenticate;
mod login;
mod profile;
mod register;

pub use self::authenticate::Authenticate;
pub use self::login::{Login, LoginResponse};
pub use self::profile::{GetProfile, Profile, UpdateAvatar, UpdateBio};
pub use self::register::Register;
