use axum::extract::{FromRequestParts, State};
use error_stack::{Result, ResultExt};
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config;
use crate::db::{DocumentStore, MemoryStore, MongoStore};
use crate::media::{LocalMediaStore, MediaStore};

#[derive(Clone, FromRequestParts)]
#[from_request(via(State))]
#[must_use]
pub struct App(Arc<AppInner>);

/// Inner type of [`App`] object.
pub struct AppInner {
    pub config: Arc<config::Server>,
    pub store: Arc<dyn DocumentStore>,
    pub media: Arc<dyn MediaStore>,

    pub(crate) jwt_encode: EncodingKey,
    pub(crate) jwt_decode: DecodingKey,

    #[cfg(test)]
    _media_dir: Option<tempfile::TempDir>,
}

#[derive(Debug, Error)]
#[error("Could not initialize server application")]
pub struct AppError;

impl App {
    pub fn new(
        config: config::Server,
        store: Arc<dyn DocumentStore>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        let (jwt_encode, jwt_decode) = Self::setup_jwt_keys(config.auth.jwt_secret.as_bytes());
        Self(Arc::new(AppInner {
            config: Arc::new(config),
            store,
            media,
            jwt_encode,
            jwt_decode,
            #[cfg(test)]
            _media_dir: None,
        }))
    }

    /// Connects to the configured document store (or makes an in-memory
    /// one) and creates the [`App`] from it.
    #[tracing::instrument(skip_all, name = "app.connect")]
    pub async fn connect(config: config::Server, in_memory: bool) -> Result<Self, AppError> {
        let store: Arc<dyn DocumentStore> = if in_memory {
            warn!("Using in-memory document store. All data will be lost after shutdown!");
            Arc::new(MemoryStore::new())
        } else {
            let store = MongoStore::connect(&config.database)
                .await
                .change_context(AppError)
                .attach_printable("could not connect to MongoDB")?;

            info!(database = %config.database.name, "Connected to MongoDB");
            Arc::new(store)
        };

        let media = LocalMediaStore::new(&config.media);
        tokio::fs::create_dir_all(media.dir())
            .await
            .change_context(AppError)
            .attach_printable_lazy(|| {
                format!("could not create media directory {}", media.dir().display())
            })?;

        Ok(Self::new(config, store, Arc::new(media)))
    }

    /// Creates a new [`App`] for testing purposes.
    ///
    /// It uses an in-memory document store and a temporary directory
    /// for uploaded images.
    #[cfg(test)]
    #[allow(clippy::expect_used)]
    pub fn new_for_tests() -> Self {
        let media_dir = tempfile::tempdir().expect("could not create temporary media directory");
        let config = config::Server::for_tests(media_dir.path());
        let media = Arc::new(LocalMediaStore::new(&config.media));

        let (jwt_encode, jwt_decode) = Self::setup_jwt_keys(config.auth.jwt_secret.as_bytes());
        Self(Arc::new(AppInner {
            config: Arc::new(config),
            store: Arc::new(MemoryStore::new()),
            media,
            jwt_encode,
            jwt_decode,
            _media_dir: Some(media_dir),
        }))
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("media", &self.media)
            .finish_non_exhaustive()
    }
}

impl std::ops::Deref for App {
    type Target = AppInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
