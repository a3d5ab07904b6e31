use axum::http::{header, HeaderValue};
use axum_test::TestServer;

use crate::extract::SessionUser;
use crate::model::User;
use crate::util::Sensitive;
use crate::App;

pub struct UserSessionData {
    pub user: User,
    /// User's login token
    pub token: String,
}

impl UserSessionData {
    /// Gets the [`SessionUser`] extractor.
    #[tracing::instrument(skip_all, name = "test_utils.users.get_session_user", fields(
        user.handle = %self.user.handle,
    ))]
    pub async fn get_session_user(&self, app: &App) -> SessionUser {
        let user = app
            .store
            .find_user(&self.user.handle)
            .await
            .unwrap()
            .unwrap();

        SessionUser { user }
    }
}

#[bon::builder]
#[tracing::instrument(skip(app, server), name = "test_utils.users.override_credentials")]
pub async fn override_credentials(
    app: &App,
    server: &mut TestServer,
    handle: &str,
) -> UserSessionData {
    let session = start_session().app(app).handle(handle).call().await;
    authorize(server, &session.token);
    session
}

/// Makes every following request of the server carry that token,
/// replacing the previous one.
pub fn authorize(server: &mut TestServer, token: &str) {
    let value = format!("Bearer {token}").parse::<HeaderValue>().unwrap();
    server.clear_headers();
    server.add_header(header::AUTHORIZATION, value);
}

#[bon::builder]
#[tracing::instrument(skip(app), name = "test_utils.users.start_session")]
pub async fn start_session(app: &App, handle: &str) -> UserSessionData {
    register().app(app).handle(handle).call().await;

    let request = crate::services::users::Login {
        handle: Sensitive::new(handle),
        password: Sensitive::new(super::DEFAULT_PASSWORD),
    };

    let response = request.perform(app).await.unwrap();
    UserSessionData {
        user: response.user,
        token: response.token.into_inner(),
    }
}

#[bon::builder]
#[tracing::instrument(skip(app, password), name = "test_utils.users.register")]
pub async fn register(app: &App, handle: &str, password: Option<&str>) -> User {
    let request = crate::services::users::Register {
        handle: Sensitive::new(handle),
        password: Sensitive::new(password.unwrap_or(super::DEFAULT_PASSWORD)),
    };

    request.perform(app).await.unwrap()
}
