//! Custom extractors for the HTTP server.
//!
//! Bodies are JSON unless the client sends `application/msgpack` (or
//! `application/x-msgpack`); responses mirror the format the client asked for.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        request::Parts,
        HeaderMap,
    },
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Serialization format of a request or response body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WireFormat {
    #[default]
    Json,
    MsgPack,
}

impl WireFormat {
    /// Format named by a `Content-Type` value; empty means JSON
    fn from_content_type(value: &str) -> Option<Self> {
        if value.is_empty() || value.contains("json") {
            Some(Self::Json)
        } else if value.contains("msgpack") {
            Some(Self::MsgPack)
        } else {
            None
        }
    }

    /// Response format preferred by the `Accept` header
    fn from_accept(headers: &HeaderMap) -> Self {
        let accept = headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if accept.contains("msgpack") {
            Self::MsgPack
        } else {
            Self::Json
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for WireFormat
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_accept(&parts.headers))
    }
}

/// Extractor for JSON or `MessagePack` request bodies.
///
/// Yields the decoded value together with the format it arrived in, so the
/// handler can answer in kind.
pub struct ApiBody<T>(pub WireFormat, pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let format = WireFormat::from_content_type(&content_type).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid content type: expected application/json or application/msgpack, got {content_type}"
            ))
        })?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {e}")))?;

        let value = match format {
            WireFormat::Json => serde_json::from_slice(&bytes)
                .map_err(|e| AppError::BadRequest(format!("Failed to deserialize JSON: {e}")))?,
            WireFormat::MsgPack => rmp_serde::from_slice(&bytes).map_err(|e| {
                AppError::BadRequest(format!("Failed to deserialize MessagePack: {e}"))
            })?,
        };

        Ok(ApiBody(format, value))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_content_type_detection() {
        assert_eq!(WireFormat::from_content_type(""), Some(WireFormat::Json));
        assert_eq!(
            WireFormat::from_content_type("application/json; charset=utf-8"),
            Some(WireFormat::Json)
        );
        assert_eq!(
            WireFormat::from_content_type("application/x-msgpack"),
            Some(WireFormat::MsgPack)
        );
        assert_eq!(WireFormat::from_content_type("text/plain"), None);
    }

    #[test]
    fn test_accept_detection() {
        let mut headers = HeaderMap::new();
        assert_eq!(WireFormat::from_accept(&headers), WireFormat::Json);

        headers.insert(ACCEPT, HeaderValue::from_static("application/msgpack"));
        assert_eq!(WireFormat::from_accept(&headers), WireFormat::MsgPack);
    }
}
