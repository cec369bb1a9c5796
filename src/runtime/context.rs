use http::Method;
use std::fmt;

use super::ApiRequest;

/// Header a caller may use to supply its own request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// ULID identifying one request in logs.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(pub ulid::Ulid);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Per-invocation context handed to business methods alongside their
/// bound parameters.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub method: Method,
    pub path: String,
}

impl RequestContext {
    /// Build the context for `req`, keeping a well-formed `x-request-id` and
    /// minting a fresh id otherwise.
    pub fn from_request(req: &ApiRequest) -> Self {
        let id = ulid::Ulid::from_string(req.header(REQUEST_ID_HEADER).trim())
            .unwrap_or_else(|_| ulid::Ulid::new());
        RequestContext {
            request_id: RequestId(id),
            method: req.method().clone(),
            path: req.path().to_string(),
        }
    }
}
