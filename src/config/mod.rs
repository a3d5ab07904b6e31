use thiserror::Error;

mod auth;
mod database;
mod limits;
mod logging;
mod media;
mod server;

pub use self::auth::Auth;
pub use self::database::Database;
pub use self::limits::Limits;
pub use self::logging::{InvalidLoggingStyle, Logging, LoggingStyle};
pub use self::media::Media;
pub use self::server::Server;

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;
