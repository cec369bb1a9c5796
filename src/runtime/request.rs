use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method};
use smallvec::SmallVec;

/// Decoded `name=value` pairs in the order they appeared.
pub type ParamVec = SmallVec<[(String, String); 8]>;

/// Where a wrapper reads its parameters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// URL query string only
    Query,
    /// Form body values first, then the query string
    Form,
}

impl ParamSource {
    /// POST submissions read the form, everything else the query string.
    pub fn for_method(method: &Method) -> Self {
        if *method == Method::POST {
            ParamSource::Form
        } else {
            ParamSource::Query
        }
    }
}

/// A request as seen by generated wrappers.
///
/// Holds the method, the path without its query, decoded query and form
/// parameters, and the headers. Build one from an [`http::Request`] with
/// [`ApiRequest::from_http`] or piece by piece for tests and adapters.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query_params: ParamVec,
    form_params: ParamVec,
    headers: HeaderMap,
}

impl ApiRequest {
    /// `target` is a request target such as `/user/profile?login=bob`.
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };
        ApiRequest {
            method,
            path: path.to_string(),
            query_params: parse_pairs(query.as_bytes()),
            form_params: ParamVec::new(),
            headers: HeaderMap::new(),
        }
    }

    pub fn get(target: &str) -> Self {
        Self::new(Method::GET, target)
    }

    pub fn post(target: &str) -> Self {
        Self::new(Method::POST, target)
    }

    /// Add a header. Names or values that are not valid HTTP are dropped.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.append(name, value);
            }
            _ => tracing::warn!(header = name, "ignoring invalid header"),
        }
        self
    }

    /// Set the `application/x-www-form-urlencoded` body.
    pub fn with_form_body(mut self, body: impl AsRef<[u8]>) -> Self {
        self.form_params = parse_pairs(body.as_ref());
        self
    }

    /// Convert an `http::Request`.
    ///
    /// The body is decoded as form parameters only for POST, PUT and PATCH
    /// requests whose content type is `application/x-www-form-urlencoded`.
    pub fn from_http<B: AsRef<[u8]>>(req: &http::Request<B>) -> Self {
        let uri = req.uri();
        let method = req.method();
        let has_form_body = (*method == Method::POST
            || *method == Method::PUT
            || *method == Method::PATCH)
            && req
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|ct| {
                    ct.trim()
                        .to_ascii_lowercase()
                        .starts_with("application/x-www-form-urlencoded")
                })
                .unwrap_or(false);
        ApiRequest {
            method: method.clone(),
            path: uri.path().to_string(),
            query_params: parse_pairs(uri.query().unwrap_or("").as_bytes()),
            form_params: if has_form_body {
                parse_pairs(req.body().as_ref())
            } else {
                ParamVec::new()
            },
            headers: req.headers().clone(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, or `""` when absent or not valid text.
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    /// First query value for `name`, or `""`.
    pub fn query_value(&self, name: &str) -> &str {
        first_value(&self.query_params, name)
    }

    /// First form value for `name`: body values win over the query string.
    pub fn form_value(&self, name: &str) -> &str {
        match first_value(&self.form_params, name) {
            "" if !self.form_params.iter().any(|(k, _)| k == name) => {
                first_value(&self.query_params, name)
            }
            value => value,
        }
    }

    /// Value for `name` from the given source, or `""`.
    pub fn param(&self, source: ParamSource, name: &str) -> &str {
        match source {
            ParamSource::Query => self.query_value(name),
            ParamSource::Form => self.form_value(name),
        }
    }
}

fn parse_pairs(input: &[u8]) -> ParamVec {
    url::form_urlencoded::parse(input)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn first_value<'a>(params: &'a ParamVec, name: &str) -> &'a str {
    params
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
        .unwrap_or("")
}
