use axum_test::TestServer;
use std::fmt::Debug;

use crate::error::ApiError;
use crate::App;

pub mod posts;
pub mod users;

/// Password used by every user registered through [`users::register`]
/// unless told otherwise.
pub const DEFAULT_PASSWORD: &str = "correct horse battery";

/// Builds an [`App`] with an in-memory document store and a temporary
/// media directory. Logs of the test are captured as well.
pub async fn build_test_app() -> App {
    crate::logging::init_for_tests();
    App::new_for_tests()
}

#[tracing::instrument(skip_all, name = "test.build_server")]
pub fn build_test_server(app: &App) -> TestServer {
    let router = crate::routes::build_axum_router(app.clone());
    TestServer::new(router).unwrap()
}

pub trait TestResultExt {
    /// Serializes the error into [`serde_json::Value`] so it can be
    /// compared with `assert_json_include!`.
    ///
    /// ## Panics
    /// It will panic if the result is [`Ok`].
    fn expect_error_json(self) -> serde_json::Value;
}

impl<T: Debug> TestResultExt for std::result::Result<T, ApiError> {
    fn expect_error_json(self) -> serde_json::Value {
        match self {
            Ok(okay) => panic!("unexpected value Ok({okay:?}), expected error"),
            Err(error) => serde_json::to_value(error).unwrap(),
        }
    }
}
