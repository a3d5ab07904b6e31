use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Media {
    /// Directory where uploaded images are written into.
    ///
    /// **Environment variables**:
    /// - `CHIRPER_MEDIA_DIR`
    pub dir: PathBuf,

    /// URL prefix used to build the public location of an
    /// uploaded image. Files are served under `/media`.
    ///
    /// **Environment variables**:
    /// - `CHIRPER_MEDIA_PUBLIC_URL`
    pub public_url: String,

    /// Maximum size of an uploaded image in bytes.
    ///
    /// **Environment variables**:
    /// - `CHIRPER_MEDIA_MAX_SIZE`
    pub max_size: usize,
}

impl Media {
    pub const DEFAULT_MAX_SIZE: usize = 5 * 1024 * 1024;
}

impl Default for Media {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("media"),
            public_url: "/media".into(),
            max_size: Self::DEFAULT_MAX_SIZE,
        }
    }
}
