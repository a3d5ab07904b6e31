use error_stack::ResultExt;
use tokio::task::spawn_blocking;

use crate::auth::password::{self, HashPasswordError};
use crate::db::StoreError;
use crate::error::{ApiError, ErrorCategory};
use crate::model::{InsertUser, User};
use crate::util::validation::{check_password, is_valid_handle};
use crate::util::Sensitive;
use crate::App;

#[derive(Debug)]
pub struct Register<'a> {
    pub handle: Sensitive<&'a str>,
    pub password: Sensitive<&'a str>,
}

fn handle_taken() -> ApiError {
    ApiError::new(ErrorCategory::Conflict).message("Handle is already taken")
}

impl Register<'_> {
    #[tracing::instrument(skip_all, name = "services.users.register")]
    pub async fn perform(self, app: &App) -> Result<User, ApiError> {
        if !is_valid_handle(&self.handle) {
            return Err(ApiError::new(ErrorCategory::InvalidRequest).message("Invalid handle"));
        }

        if let Some(message) = check_password(&self.password) {
            return Err(ApiError::new(ErrorCategory::InvalidRequest).message(message));
        }

        // Saves us from hashing the password if we already know
        // that the handle is taken.
        if app.store.find_user(&self.handle).await?.is_some() {
            return Err(handle_taken());
        }

        let password = self.password.as_str().to_owned();
        let password_hash = spawn_blocking(move || password::hash(password))
            .await
            .change_context(HashPasswordError)??;

        let result = app
            .store
            .insert_user(
                InsertUser::builder()
                    .handle(&self.handle)
                    .password_hash(&password_hash)
                    .build(),
            )
            .await;

        match result {
            Ok(user) => Ok(user),
            Err(report) if matches!(report.current_context(), StoreError::DuplicateKey) => {
                Err(handle_taken())
            }
            Err(report) => Err(report.into()),
        }
    }
}
