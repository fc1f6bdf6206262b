//! Per-request header checks used as route dependencies

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::errors::ApiError;
use crate::extract::required_header;

pub const EXPECTED_TOKEN: &str = "fake-super-secret-token";
pub const EXPECTED_KEY: &str = "fake-super-secret-key";

/// Proof that the request carried `X-Token: fake-super-secret-token`
#[derive(Debug, Clone, Copy)]
pub struct VerifiedToken;

impl<S> FromRequestParts<S> for VerifiedToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = required_header(&parts.headers, "x-token")?;
        if token != EXPECTED_TOKEN {
            warn!("rejected request with invalid X-Token");
            return Err(ApiError::BadRequest("X-Token header invalid".to_string()));
        }
        Ok(VerifiedToken)
    }
}

/// The `X-Key` header value, once it matched `fake-super-secret-key`
#[derive(Debug, Clone)]
pub struct VerifiedKey(pub String);

impl<S> FromRequestParts<S> for VerifiedKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key = required_header(&parts.headers, "x-key")?;
        if key != EXPECTED_KEY {
            warn!("rejected request with invalid X-Key");
            return Err(ApiError::BadRequest("X-Key header invalid".to_string()));
        }
        Ok(VerifiedKey(key.to_string()))
    }
}
