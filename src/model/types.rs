use crate::rules::ValidationRule;
use std::fmt;

/// The two field kinds the generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    String,
}

impl FieldKind {
    /// Map a declared type name to a kind. `None` for anything unsupported.
    pub fn from_declared(declared: &str) -> Option<Self> {
        match declared.trim() {
            "int" | "integer" | "i64" => Some(FieldKind::Integer),
            "string" | "String" | "str" => Some(FieldKind::String),
            _ => None,
        }
    }

    /// Rust type used for this kind in generated structs.
    pub fn rust_type(self) -> &'static str {
        match self {
            FieldKind::Integer => "i64",
            FieldKind::String => "String",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Integer => write!(f, "int"),
            FieldKind::String => write!(f, "string"),
        }
    }
}

/// Composite `(type, field)` key addressing one field of one parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    pub type_name: String,
    pub field_name: String,
}

impl FieldKey {
    pub fn new(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        FieldKey {
            type_name: type_name.into(),
            field_name: field_name.into(),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.field_name)
    }
}

/// One input attribute of a parameter type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name as declared
    pub name: String,
    /// Kind derived from the declared type
    pub kind: FieldKind,
    /// Constraints parsed from the annotation
    pub rules: ValidationRule,
}

impl Field {
    /// Request key the field is read from: the declared name, lower-cased.
    pub fn source_key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// A named, ordered collection of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterType {
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<Field>,
}

impl ParameterType {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
