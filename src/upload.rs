//! Multipart form bodies read fully into memory

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use tracing::debug;

use crate::errors::{ApiError, FieldError, Loc};

/// One part of a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name; `None` for plain text fields
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// All parts of a multipart body, keyed by field name
///
/// A request that is not `multipart/form-data` at all extracts as an empty
/// form, so required parts are reported as missing rather than as a
/// content-type error.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    parts: HashMap<String, UploadedFile>,
}

impl UploadForm {
    /// Drains a multipart stream; later parts with the same name replace earlier ones
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut parts = HashMap::new();
        while let Some(field) = multipart.next_field().await.map_err(parse_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let filename = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.map_err(parse_error)?;
            debug!(field = %name, size = data.len(), "read multipart part");
            parts.insert(
                name,
                UploadedFile {
                    filename,
                    content_type,
                    data,
                },
            );
        }
        Ok(Self { parts })
    }

    pub fn get(&self, name: &str) -> Option<&UploadedFile> {
        self.parts.get(name)
    }

    /// Fails with one "field required" entry per absent name
    pub fn require(&self, names: &[&str]) -> Result<(), ApiError> {
        let missing: Vec<FieldError> = names
            .iter()
            .filter(|name| !self.parts.contains_key(**name))
            .map(|name| FieldError::missing(vec![Loc::from("body"), Loc::from(*name)]))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(missing))
        }
    }

    pub fn file(&self, name: &str) -> Result<&UploadedFile, ApiError> {
        self.parts
            .get(name)
            .ok_or_else(|| ApiError::invalid(FieldError::missing(vec![Loc::from("body"), Loc::from(name)])))
    }

    /// A part read as UTF-8 text
    pub fn text(&self, name: &str) -> Result<&str, ApiError> {
        let part = self.file(name)?;
        std::str::from_utf8(&part.data).map_err(|_| {
            ApiError::invalid(FieldError::new(
                vec![Loc::from("body"), Loc::from(name)],
                "value is not valid text",
                "type_error.str",
            ))
        })
    }
}

fn parse_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    debug!(error = %err, "multipart parse failure");
    ApiError::BadRequest("There was an error parsing the body".to_string())
}

impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));
        if !is_multipart {
            return Ok(Self::default());
        }

        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Self::read(multipart).await
    }
}
