use async_trait::async_trait;
use error_stack::{Report, Result, ResultExt};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use super::{Image, MediaError, MediaStore};
use crate::config;

/// Writes images into a local directory. The server exposes that
/// directory under the configured public URL.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    dir: PathBuf,
    public_url: String,
}

impl LocalMediaStore {
    #[must_use]
    pub fn new(config: &config::Media) -> Self {
        Self {
            dir: config.dir.clone(),
            public_url: config.public_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name_of<'a>(&self, url: &'a str) -> Option<&'a str> {
        let name = url.strip_prefix(&self.public_url)?.strip_prefix('/')?;
        let is_plain_name = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains(['/', '\\']);

        is_plain_name.then_some(name)
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    #[tracing::instrument(skip_all, name = "media.local.store")]
    async fn store(&self, image: &Image) -> Result<String, MediaError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .change_context(MediaError)
            .attach_printable_lazy(|| format!("could not create {}", self.dir.display()))?;

        let name = format!("{}.{}", Uuid::now_v7(), image.format.extension());
        let path = self.dir.join(&name);
        tokio::fs::write(&path, &image.bytes)
            .await
            .change_context(MediaError)
            .attach_printable_lazy(|| format!("could not write {}", path.display()))?;

        debug!(file = %name, size = image.bytes.len(), "stored image");
        Ok(format!("{}/{name}", self.public_url))
    }

    #[tracing::instrument(skip(self), name = "media.local.delete")]
    async fn delete(&self, url: &str) -> Result<(), MediaError> {
        let Some(name) = self.file_name_of(url) else {
            return Err(Report::new(MediaError)
                .attach_printable(format!("{url:?} is not stored in this media store")));
        };

        let path = self.dir.join(name);
        tokio::fs::remove_file(&path)
            .await
            .change_context(MediaError)
            .attach_printable_lazy(|| format!("could not delete {}", path.display()))
    }
}
