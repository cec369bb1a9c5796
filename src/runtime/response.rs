use http::header::{HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use serde::Serialize;

use super::{ApiError, RequestContext};

/// Response produced by every generated dispatcher and wrapper.
pub type ApiResponse = http::Response<Vec<u8>>;

/// Success body of an endpoint: `{"response":<output>,"error":""}`.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T> {
    pub response: Option<&'a T>,
    pub error: &'a str,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

const INTERNAL_ERROR_BODY: &[u8] = br#"{"error":"internal server error"}"#;

/// JSON error response `{"error":"<message>"}`.
pub fn error_response(status: StatusCode, message: &str) -> ApiResponse {
    tracing::debug!(status = status.as_u16(), reason = message, "request rejected");
    match serde_json::to_vec(&ErrorBody { error: message }) {
        Ok(body) => json_response(status, body),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize error body");
            json_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY.to_vec())
        }
    }
}

/// 200 response carrying a serialized envelope.
pub fn envelope_response<T: Serialize>(
    ctx: &RequestContext,
    envelope: &Envelope<'_, T>,
) -> ApiResponse {
    match serde_json::to_vec(envelope) {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(err) => {
            tracing::error!(
                request_id = %ctx.request_id,
                path = %ctx.path,
                error = %err,
                "failed to serialize response envelope"
            );
            json_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY.to_vec())
        }
    }
}

/// Map a failed business call to a response.
///
/// An [`ApiError`] anywhere in the chain selects status and message. Any
/// other error is logged with the request id and answered with a generic 500
/// so internal details never reach the caller.
pub fn failure_response(ctx: &RequestContext, err: anyhow::Error) -> ApiResponse {
    if let Some(api) = err.downcast_ref::<ApiError>() {
        return error_response(api.status, &api.message);
    }
    tracing::error!(
        request_id = %ctx.request_id,
        method = %ctx.method,
        path = %ctx.path,
        error = %format!("{err:#}"),
        "handler failed"
    );
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

fn json_response(status: StatusCode, body: Vec<u8>) -> ApiResponse {
    let mut response = http::Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
