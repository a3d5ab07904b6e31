use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use bytes::Bytes;

use crate::error::{ApiError, ErrorCategory};

/// A file sent through a `multipart/form-data` request.
#[derive(Clone)]
pub struct Upload {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Every field of a `multipart/form-data` request, read into memory.
///
/// The total size is bounded by the body limit of the server.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: Vec<(String, Upload)>,
}

impl MultipartForm {
    /// Takes the first file (or any other field) sent with that name.
    pub fn file(&mut self, name: &str) -> Option<Upload> {
        let index = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(index).1)
    }

    /// Takes the first text field sent with that name.
    pub fn text(&mut self, name: &str) -> Result<Option<String>, ApiError> {
        let Some(upload) = self.file(name) else {
            return Ok(None);
        };

        String::from_utf8(upload.bytes.to_vec()).map(Some).map_err(|_| {
            ApiError::new(ErrorCategory::InvalidRequest)
                .message(format!("Field {name:?} must be a valid UTF-8 text"))
        })
    }
}

fn invalid_multipart(error: &MultipartError) -> ApiError {
    ApiError::new(ErrorCategory::InvalidRequest).message(error.body_text())
}

#[axum::async_trait]
impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    #[tracing::instrument(skip_all, name = "extractors.multipart")]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|error| {
            ApiError::new(ErrorCategory::InvalidRequest).message(error.body_text())
        })?;

        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| invalid_multipart(&e))?
        {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };

            let content_type = field.content_type().map(ToString::to_string);
            let bytes = field.bytes().await.map_err(|e| invalid_multipart(&e))?;
            form.fields.push((
                name,
                Upload {
                    bytes,
                    content_type,
                },
            ));
        }

        Ok(form)
    }
}
