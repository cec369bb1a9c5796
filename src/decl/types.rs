use serde::{Deserialize, Serialize};

/// Everything a generation run consumes, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declarations {
    /// Declared input shapes
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    /// Declared handler functions, routed or not
    #[serde(default)]
    pub handlers: Vec<HandlerDecl>,
}

/// One declared parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Type name, used verbatim as the generated struct name
    pub name: String,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// One field of a declared parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Field name
    pub name: String,
    /// Declared type as written (`int`, `string`, ...)
    #[serde(rename = "type")]
    pub ty: String,
    /// Raw validation annotation, e.g. `required,min=0,max=128`
    #[serde(default, alias = "apivalidator")]
    pub annotation: Option<String>,
}

/// One declared handler function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerDecl {
    /// Handler method name on the service
    pub name: String,
    /// Receiver type the handler belongs to
    pub service: String,
    /// The single declared input parameter type
    #[serde(default)]
    pub input: Option<String>,
    /// The first declared result type (`*User` and `User` are equivalent)
    #[serde(default)]
    pub output: Option<String>,
    /// Routing block; handlers without one are not endpoints
    #[serde(default)]
    pub api: Option<RouteBlock>,
}

/// Routing metadata attached to a handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteBlock {
    /// Exact request path
    #[serde(default)]
    pub url: String,
    /// `GET`, `POST` or empty for any method
    #[serde(default)]
    pub method: String,
    /// Whether the trusted-caller credential is required
    #[serde(default)]
    pub auth: bool,
}
