//! Save handler module
//!
//! Persists a named JSON payload from a `POST /save` body. Validation
//! and the filesystem write return explicit results; every failure is
//! mapped to a status code at this boundary and never propagates
//! further.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::storage::SaveError;

/// Exact message for requests lacking a usable filename or content
pub const MISSING_FIELD_MESSAGE: &str = "Missing filename or content";

/// Validated save request
#[derive(Debug)]
pub struct SaveRequest {
    pub filename: String,
    pub content: Value,
}

/// Client-side faults detected before touching the filesystem
#[derive(Debug)]
pub enum SaveRequestError {
    /// Body was not valid JSON
    InvalidJson(String),
    /// `filename` or `content` absent, empty, or null
    MissingField,
}

/// Parse and validate a `/save` request body
///
/// `filename` must be a non-empty string. `content` may be any JSON
/// value but an explicit `null` counts as missing, matching the
/// stricter of the two reference deployments.
pub fn parse_save_request(body: &[u8]) -> Result<SaveRequest, SaveRequestError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| SaveRequestError::InvalidJson(e.to_string()))?;

    let filename = value
        .get("filename")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    let content = value.get("content").filter(|c| !c.is_null());

    match (filename, content) {
        (Some(filename), Some(content)) => Ok(SaveRequest {
            filename: filename.to_string(),
            content: content.clone(),
        }),
        _ => Err(SaveRequestError::MissingField),
    }
}

/// Failures while reading the request body
#[derive(Debug)]
enum BodyReadError {
    /// Body exceeded the configured size limit
    TooLarge,
    /// Transport-level read failure
    Read(String),
}

/// Collect the request body, enforcing the configured size limit
///
/// The limit applies to the bytes actually read, so chunked bodies
/// without a Content-Length header are bounded too.
async fn read_body_bounded<B>(body: B, max_body_size: u64) -> Result<Bytes, BodyReadError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(BodyReadError::TooLarge),
        Err(e) => Err(BodyReadError::Read(e.to_string())),
    }
}

/// Handle `POST /save`
///
/// Emits exactly one log line per attempt, success or failure.
pub async fn handle_save(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let max_body_size = state.config.http.max_body_size;
    let body = match read_body_bounded(req.into_body(), max_body_size).await {
        Ok(bytes) => bytes,
        Err(BodyReadError::TooLarge) => {
            logger::log_save_rejected(&format!(
                "request body exceeds limit of {max_body_size} bytes"
            ));
            return http::build_413_response();
        }
        Err(BodyReadError::Read(e)) => {
            logger::log_save_rejected(&format!("failed to read request body: {e}"));
            return http::build_error_response(
                StatusCode::BAD_REQUEST,
                "Failed to read request body",
            );
        }
    };

    let save_req = match parse_save_request(&body) {
        Ok(r) => r,
        Err(SaveRequestError::InvalidJson(detail)) => {
            logger::log_save_rejected(&format!("invalid JSON: {detail}"));
            return http::build_error_response(
                StatusCode::BAD_REQUEST,
                &format!("Invalid JSON: {detail}"),
            );
        }
        Err(SaveRequestError::MissingField) => {
            logger::log_save_rejected(MISSING_FIELD_MESSAGE);
            return http::build_error_response(StatusCode::BAD_REQUEST, MISSING_FIELD_MESSAGE);
        }
    };

    match state.store.save(&save_req.filename, &save_req.content).await {
        Ok(path) => {
            logger::log_save_success(&path);
            http::build_json_response(
                StatusCode::OK,
                &serde_json::json!({
                    "status": "success",
                    "path": path.display().to_string(),
                }),
            )
        }
        // A name that sanitizes to nothing is a client fault, same as absent
        Err(SaveError::InvalidFilename) => {
            logger::log_save_rejected(MISSING_FIELD_MESSAGE);
            http::build_error_response(StatusCode::BAD_REQUEST, MISSING_FIELD_MESSAGE)
        }
        Err(e) => {
            logger::log_save_error(&e.to_string());
            http::build_error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}
