use crate::error::{ApiError, ErrorCategory};
use crate::extract::{SessionUser, Upload};
use crate::model::{Post, UpdateUser, User};
use crate::services::util::{check_image, discard_media};
use crate::util::validation::{char_len, BIO_MAX};
use crate::App;

#[derive(Debug)]
pub struct GetProfile<'a> {
    pub handle: &'a str,
}

#[derive(Debug)]
pub struct Profile {
    pub user: User,
    /// Newest first.
    pub posts: Vec<Post>,
}

impl GetProfile<'_> {
    #[tracing::instrument(skip(app), name = "services.users.profile.get")]
    pub async fn perform(self, app: &App) -> Result<Profile, ApiError> {
        let Some(user) = app.store.find_user(self.handle).await? else {
            return Err(ApiError::new(ErrorCategory::NotFound).message("User not found"));
        };

        let posts = app.store.list_posts(Some(&user.handle)).await?;
        Ok(Profile { user, posts })
    }
}

#[derive(Debug)]
pub struct UpdateAvatar {
    pub image: Upload,
}

impl UpdateAvatar {
    /// Posts, comments and replies made before keep the avatar they
    /// were created with.
    #[tracing::instrument(skip_all, name = "services.users.profile.avatar")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<User, ApiError> {
        let image = check_image(app, self.image)?;
        let url = app.media.store(&image).await?;

        let update = UpdateUser::builder().avatar(&url).build();
        match app.store.update_user(&session_user.handle, update).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                discard_media(app, &url).await;
                Err(ApiError::new(ErrorCategory::NotFound).message("User not found"))
            }
            Err(report) => {
                discard_media(app, &url).await;
                Err(report.into())
            }
        }
    }
}

#[derive(Debug)]
pub struct UpdateBio<'a> {
    /// An empty biography clears it.
    pub bio: &'a str,
}

impl UpdateBio<'_> {
    #[tracing::instrument(skip(app, session_user), name = "services.users.profile.bio")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<User, ApiError> {
        if char_len(self.bio) > BIO_MAX {
            return Err(ApiError::new(ErrorCategory::InvalidRequest)
                .message(format!("Biography must not exceed {BIO_MAX} characters")));
        }

        let bio = Some(self.bio).filter(|v| !v.is_empty());
        let update = UpdateUser::builder().bio(bio).build();

        app.store
            .update_user(&session_user.handle, update)
            .await?
            .ok_or_else(|| ApiError::new(ErrorCategory::NotFound).message("User not found"))
    }
}
