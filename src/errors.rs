use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// One step in the location of an invalid value, e.g. `body` / `images` / `0` / `url`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Loc {
    Key(String),
    Index(usize),
}

impl From<&str> for Loc {
    fn from(key: &str) -> Self {
        Loc::Key(key.to_string())
    }
}

impl From<usize> for Loc {
    fn from(index: usize) -> Self {
        Loc::Index(index)
    }
}

/// A single validation failure as reported to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<Loc>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: Vec<Loc>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    /// A required value that was not supplied
    pub fn missing(loc: Vec<Loc>) -> Self {
        Self::new(loc, "field required", "value_error.missing")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<String> = self
            .loc
            .iter()
            .map(|l| match l {
                Loc::Key(k) => k.clone(),
                Loc::Index(i) => i.to_string(),
            })
            .collect();
        write!(f, "{}: {}", path.join("."), self.msg)
    }
}

/// Flattens nested `validator` errors into one entry per violation
///
/// Entries come back sorted by location so responses are stable.
pub fn flatten_validation_errors(errors: &ValidationErrors, prefix: &[Loc]) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect_validation_errors(errors, prefix, &mut out);
    sort_field_errors(&mut out);
    out
}

/// Orders errors by location, then by kind
pub fn sort_field_errors(errors: &mut [FieldError]) {
    errors.sort_by(|a, b| a.loc.cmp(&b.loc).then_with(|| a.kind.cmp(&b.kind)));
}

fn collect_validation_errors(errors: &ValidationErrors, prefix: &[Loc], out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let mut loc = prefix.to_vec();
        loc.push(Loc::Key(field.to_string()));
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError::new(loc.clone(), describe(e), format!("value_error.{}", e.code))));
            }
            ValidationErrorsKind::Struct(inner) => collect_validation_errors(inner, &loc, out),
            ValidationErrorsKind::List(entries) => {
                for (index, inner) in entries {
                    let mut item_loc = loc.clone();
                    item_loc.push(Loc::Index(*index));
                    collect_validation_errors(inner, &item_loc, out);
                }
            }
        }
    }
}

fn describe(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("invalid value ({})", error.code),
    }
}

/// Raised by the unicorn endpoint for the one name it refuses
///
/// Translated into a 418 by its own `IntoResponse`, separate from `ApiError`'s
/// mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Oops! {name} did something. There goes a rainbow...")]
pub struct UnicornError {
    pub name: String,
}

impl IntoResponse for UnicornError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "message": self.to_string()
        }));
        (StatusCode::IM_A_TEAPOT, body).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Unicorn(#[from] UnicornError),
    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

impl ApiError {
    /// A validation failure with a single entry
    pub fn invalid(error: FieldError) -> Self {
        ApiError::Validation(vec![error])
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(flatten_validation_errors(&errors, &[Loc::from("body")]))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Validation(errors) => (StatusCode::UNPROCESSABLE_ENTITY, serde_json::json!(errors)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!(msg)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, serde_json::json!(msg)),
            ApiError::Unicorn(err) => return err.into_response(),
            ApiError::Database(err) => {
                error!(error = %err, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, serde_json::json!("Internal server error"))
            }
        };

        let body = Json(serde_json::json!({
            "detail": detail
        }));

        (status, body).into_response()
    }
}
