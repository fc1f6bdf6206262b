//! Extractors that turn raw request parts into validated values
//!
//! Each reads the payload untyped, checks every declared field for presence
//! and type, deserializes it and then runs the `validator` rules. All
//! failures of one request are reported together as a single 422.

use std::collections::HashMap;

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{request::Parts, HeaderMap},
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use crate::errors::{flatten_validation_errors, sort_field_errors, ApiError, FieldError, Loc};
use crate::shape::{dict_error, FieldCheck, Shape, Source};

fn rejected(location: &str, msg: String, kind: &str) -> ApiError {
    ApiError::invalid(FieldError::new(vec![Loc::from(location)], msg, kind))
}

/// Shape check, deserialization and constraint rules over one payload
///
/// Constraint errors at or below a field that already failed its shape check
/// are dropped, since they only describe the placeholder.
fn parse_checked<T>(mut value: Value, location: &str, source: Source) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate + Shape,
{
    let root = vec![Loc::from(location)];
    let Some(fields) = value.as_object_mut() else {
        return Err(ApiError::invalid(dict_error(root)));
    };

    let mut check = FieldCheck::new(fields, root.clone(), source);
    T::check_shape(&mut check);
    let mut errors = check.into_errors();

    let parsed: T = match serde_json::from_value(value) {
        Ok(parsed) => parsed,
        Err(err) => {
            errors.push(FieldError::new(root, err.to_string(), "value_error"));
            sort_field_errors(&mut errors);
            return Err(ApiError::Validation(errors));
        }
    };

    if let Err(violations) = parsed.validate() {
        let shaped: Vec<Vec<Loc>> = errors.iter().map(|e| e.loc.clone()).collect();
        errors.extend(
            flatten_validation_errors(&violations, &root)
                .into_iter()
                .filter(|v| !shaped.iter().any(|loc| v.loc.starts_with(loc))),
        );
    }

    if errors.is_empty() {
        Ok(parsed)
    } else {
        sort_field_errors(&mut errors);
        Err(ApiError::Validation(errors))
    }
}

fn text_fields(pairs: HashMap<String, String>) -> Value {
    Value::Object(pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect::<Map<_, _>>())
}

/// A JSON body that parsed and passed validation
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Shape,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| rejected("body", rejection.body_text(), "value_error.jsondecode"))?;
        Ok(ValidJson(parse_checked(value, "body", Source::Json)?))
    }
}

/// A urlencoded form body that parsed and passed validation
#[derive(Debug, Clone)]
pub struct ValidForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidForm<T>
where
    T: DeserializeOwned + Validate + Shape,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|rejection| rejected("body", rejection.body_text(), "value_error.form"))?;
        Ok(ValidForm(parse_checked(text_fields(pairs), "body", Source::Text)?))
    }
}

/// Query string parameters that parsed and passed validation
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate + Shape,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejected("query", rejection.body_text(), "value_error.query"))?;
        Ok(ValidQuery(parse_checked(text_fields(pairs), "query", Source::Text)?))
    }
}

/// Path parameters that parsed into `T`
///
/// Unlike axum's `Path`, a value of the wrong type is a 422.
#[derive(Debug, Clone)]
pub struct ValidPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| rejected("path", rejection.body_text(), "type_error"))?;
        Ok(ValidPath(value))
    }
}

/// Reads a required header as text
///
/// A missing or non-text header is reported as a validation failure located at
/// `["header", name]`.
pub fn required_header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, ApiError> {
    let loc = vec![Loc::from("header"), Loc::from(name)];
    let value = headers
        .get(name)
        .ok_or_else(|| ApiError::invalid(FieldError::missing(loc.clone())))?;
    value
        .to_str()
        .map_err(|_| ApiError::invalid(FieldError::new(loc, "header value is not valid text", "type_error.str")))
}
