use askama::Template;

use super::binding::StructView;
use super::dispatch::ServiceView;

/// Marker line opening every generated file.
#[derive(Template)]
#[template(path = "header.rs.txt", escape = "none")]
pub struct HeaderTemplate {
    /// File name of the declarations the output came from
    pub source: String,
    pub has_comment: bool,
    pub comment: String,
}

/// Declared parameter types as plain structs.
#[derive(Template)]
#[template(path = "params.rs.txt", escape = "none")]
pub struct ParamsTemplate {
    pub types: Vec<StructView>,
}

/// Envelope aliases, dispatcher and endpoint wrappers of one service.
#[derive(Template)]
#[template(path = "service.rs.txt", escape = "none")]
pub struct ServiceTemplate {
    /// Path of the runtime support module
    pub rt: String,
    /// Quoted credential header name
    pub credential_header: String,
    /// Quoted credential value
    pub credential_value: String,
    pub service: ServiceView,
}
