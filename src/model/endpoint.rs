use std::fmt;

/// Method constraint of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    /// No method gating; GET and POST submissions are both accepted
    Any,
}

impl HttpMethod {
    /// Parse the routing block's `method`; empty means [`HttpMethod::Any`].
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" => Some(HttpMethod::Any),
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Any => "ANY",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One routed, validated handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub handler_name: String,
    /// Receiver type the handler belongs to
    pub service: String,
    pub url_path: String,
    pub method: HttpMethod,
    pub auth_required: bool,
    /// Name of a declared parameter type
    pub input_type: String,
    /// Opaque output type name
    pub output_type: String,
}

impl Endpoint {
    /// Name of the generated envelope shape for this endpoint.
    pub fn envelope_name(&self) -> String {
        format!(
            "Response{}{}",
            self.service,
            crate::generator::to_camel_case(&self.handler_name)
        )
    }

    /// Name of the generated inherent method that serves this endpoint.
    pub fn wrapper_name(&self) -> String {
        format!("serve_{}_endpoint", self.handler_name)
    }
}

/// Endpoints grouped under one receiver, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub endpoints: Vec<Endpoint>,
}
