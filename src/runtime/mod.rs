//! # Runtime Support
//!
//! The small set of types generated code is written against. Generated
//! dispatchers and wrappers reach everything here through the configured
//! runtime path (`::apigen::runtime` by default), so this module is the whole
//! contract between the generator and a service crate.
//!
//! ## Request Flow
//!
//! ```text
//! http::Request → ApiRequest → Service::serve_http → wrapper → business method
//!                                                          ↓
//!                      ApiResponse ← envelope_response / failure_response / error_response
//! ```
//!
//! ## Response Bodies
//!
//! - Success: `{"response":<output>,"error":""}` with status 200
//! - Rejection: `{"error":"<message>"}` with the matching status
//!   (400, 403, 404, 406, or 500 for unmapped business failures)
//!
//! Business methods return `Result<Output, E>` where `E` converts into
//! [`anyhow::Error`]. Returning an [`ApiError`] (directly or inside an
//! `anyhow::Error`) selects the status and message; anything else is logged
//! and answered with a generic 500.

mod context;
mod error;
mod request;
mod response;

pub use context::{RequestContext, RequestId};
pub use error::ApiError;
pub use http::{Method, StatusCode};
pub use request::{ApiRequest, ParamSource, ParamVec};
pub use response::{
    envelope_response, error_response, failure_response, ApiResponse, Envelope,
};

/// A generated service dispatcher.
///
/// Every service with routed handlers implements this, which lets callers
/// hold different services behind one interface.
pub trait HttpService {
    /// Route one request and produce exactly one response.
    fn serve_http(&self, req: &ApiRequest) -> ApiResponse;

    /// Convenience entry point for a raw `http::Request`.
    fn serve_request<B: AsRef<[u8]>>(&self, req: &http::Request<B>) -> ApiResponse
    where
        Self: Sized,
    {
        self.serve_http(&ApiRequest::from_http(req))
    }
}

impl<S: HttpService + ?Sized> HttpService for &S {
    fn serve_http(&self, req: &ApiRequest) -> ApiResponse {
        (**self).serve_http(req)
    }
}

impl<S: HttpService + ?Sized> HttpService for std::sync::Arc<S> {
    fn serve_http(&self, req: &ApiRequest) -> ApiResponse {
        (**self).serve_http(req)
    }
}
