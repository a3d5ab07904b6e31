use error_stack::ResultExt;
use tokio::task::spawn_blocking;

use crate::auth::jwt::LoginClaims;
use crate::auth::password::{self, HashPasswordError, VerifyPasswordError};
use crate::error::{ApiError, ErrorCategory};
use crate::model::User;
use crate::util::Sensitive;
use crate::App;

#[derive(Debug)]
pub struct Login<'a> {
    pub handle: Sensitive<&'a str>,
    pub password: Sensitive<&'a str>,
}

#[derive(Debug)]
pub struct LoginResponse {
    pub token: Sensitive<String>,
    pub user: User,
}

fn invalid_credentials() -> ApiError {
    ApiError::new(ErrorCategory::InvalidCredentials).message("Invalid handle or password")
}

impl Login<'_> {
    #[tracing::instrument(skip_all, name = "services.users.login")]
    pub async fn perform(self, app: &App) -> Result<LoginResponse, ApiError> {
        let password = self.password.as_bytes().to_vec();
        let Some(user) = app.store.find_user(&self.handle).await? else {
            // We should not give away that the user does not exist, so
            // spend the same amount of time as verifying a password.
            spawn_blocking(move || password::hash(password))
                .await
                .change_context(HashPasswordError)??;

            return Err(invalid_credentials());
        };

        let correct_hash = user.password_hash.as_str().to_owned();
        let is_matched = spawn_blocking(move || password::verify(&password, &correct_hash))
            .await
            .change_context(VerifyPasswordError)??;

        if !is_matched {
            return Err(invalid_credentials());
        }

        let token = LoginClaims::generate(app, &user, None).encode(app)?;
        Ok(LoginResponse {
            token: Sensitive::new(token),
            user,
        })
    }
}
