//! JSON request decoding and enveloped response encoding.

use axum::body::Body;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::error::ApiError;

/// Largest request body the API will read.
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Reasons a request body is refused.
#[derive(Debug, Error)]
pub enum MalformedBody {
    #[error("body must not be empty")]
    Empty,

    #[error("body must not be larger than {0} bytes")]
    TooLarge(usize),

    #[error("failed to read body: {0}")]
    Read(String),

    #[error("body contains invalid JSON: {0}")]
    Invalid(#[source] serde_json::Error),

    #[error("body must only contain a single JSON value")]
    MultipleValues,
}

/// Parses exactly one JSON value of type `T` from `body`.
///
/// Unknown fields are rejected by the target type itself
/// (`#[serde(deny_unknown_fields)]`); anything but whitespace after the first
/// value is refused.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, MalformedBody> {
    if body.len() > MAX_BODY_BYTES {
        return Err(MalformedBody::TooLarge(MAX_BODY_BYTES));
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(MalformedBody::Empty);
    }

    let mut de = serde_json::Deserializer::from_slice(body);
    let value = T::deserialize(&mut de).map_err(MalformedBody::Invalid)?;
    de.end().map_err(|_| MalformedBody::MultipleValues)?;
    Ok(value)
}

/// Reads the whole request body, up to [`MAX_BODY_BYTES`], and decodes it.
pub async fn read_json<T: DeserializeOwned>(body: Body) -> Result<T, ApiError> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| MalformedBody::Read(e.to_string()))?;
    Ok(decode_json(&bytes)?)
}

/// Extractor form of [`read_json`].
pub struct ReadJson<T>(pub T);

impl<S, T> FromRequest<S> for ReadJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        read_json(req.into_body()).await.map(ReadJson)
    }
}

/// A JSON object with a single top-level key wrapping the payload.
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    key: &'static str,
    payload: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(key: &'static str, payload: T) -> Self {
        Self { key, payload }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.payload)?;
        map.end()
    }
}

/// Encodes `data` as tab-indented JSON followed by a newline.
pub fn encode_json<T: Serialize>(data: &Envelope<T>) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::with_capacity(256);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Builds a JSON response with the given status and extra headers.
///
/// `Content-Type` is always `application/json`, even if `headers` tries to
/// set it.
pub fn write_json<T: Serialize>(
    status: StatusCode,
    data: &Envelope<T>,
    headers: Option<HeaderMap>,
) -> Result<Response, ApiError> {
    let body =
        encode_json(data).map_err(|e| ApiError::Internal(format!("encode response: {e}")))?;

    let mut response = (status, body).into_response();
    let response_headers = response.headers_mut();
    if let Some(extra) = headers {
        response_headers.extend(extra);
    }
    response_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(response)
}
