use async_trait::async_trait;
use bytes::Bytes;
use error_stack::Result;
use std::fmt::Debug;
use thiserror::Error;

mod local;

pub use self::local::LocalMediaStore;

#[derive(Debug, Error)]
#[error("Could not process media file")]
pub struct MediaError;

/// Stores uploaded images and hands out the URL where they can be
/// fetched from.
#[async_trait]
pub trait MediaStore: Debug + Send + Sync {
    async fn store(&self, image: &Image) -> Result<String, MediaError>;

    /// Deletes an image previously stored by [`MediaStore::store`].
    async fn delete(&self, url: &str) -> Result<(), MediaError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Detects the format from the magic bytes of the file.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidImage {
    #[error("Image must not be empty")]
    Empty,
    #[error("Image must not be larger than {0} bytes")]
    TooLarge(usize),
    #[error("Only PNG, JPEG, GIF and WebP images are allowed")]
    UnsupportedType,
}

/// An uploaded image that passed validation.
#[derive(Clone)]
pub struct Image {
    pub bytes: Bytes,
    pub format: ImageFormat,
}

impl Image {
    /// Validates the uploaded file. The declared content type, if there
    /// is any, must be an image type and the content must be an image
    /// of the allowed formats.
    pub fn validate(
        bytes: Bytes,
        content_type: Option<&str>,
        max_size: usize,
    ) -> std::result::Result<Self, InvalidImage> {
        if bytes.is_empty() {
            return Err(InvalidImage::Empty);
        }

        if bytes.len() > max_size {
            return Err(InvalidImage::TooLarge(max_size));
        }

        if let Some(content_type) = content_type {
            let declared = content_type
                .parse::<mime::Mime>()
                .map_err(|_| InvalidImage::UnsupportedType)?;

            let is_generic = declared == mime::APPLICATION_OCTET_STREAM;
            if !is_generic && declared.type_() != mime::IMAGE {
                return Err(InvalidImage::UnsupportedType);
            }
        }

        let format = ImageFormat::sniff(&bytes).ok_or(InvalidImage::UnsupportedType)?;
        Ok(Self { bytes, format })
    }
}

impl Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}
