//! Generation-time errors.
//!
//! Every variant is fatal to a generation run: the pipeline stops at the first
//! error and nothing is written. Each variant carries enough location data to
//! name the offending type, field or handler.

use std::fmt;

use crate::model::FieldKey;

/// Error raised while turning declarations into a model or generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// An annotation could not be tokenized or one of its values is invalid
    /// for the field kind.
    MalformedAnnotation {
        /// Field the annotation belongs to
        field: FieldKey,
        /// The offending directive as written
        token: String,
        /// What is wrong with it
        reason: String,
    },
    /// A field is declared with a type that is neither integer nor string.
    UnsupportedFieldKind {
        /// Field with the unsupported type
        field: FieldKey,
        /// The declared type as written
        declared: String,
    },
    /// A routed handler references an input type that is not declared, or
    /// has no output type.
    UnresolvedType {
        /// Service owning the handler
        service: String,
        /// Handler name
        handler: String,
        /// The unresolved reference (empty when missing entirely)
        reference: String,
    },
    /// The same name is declared twice where it must be unique.
    DuplicateDeclaration {
        /// What kind of item is duplicated ("type", "field", "handler", "url", "envelope")
        what: &'static str,
        /// Where the duplicate lives (type or service name)
        scope: String,
        /// The duplicated name
        name: String,
    },
    /// A declared name cannot be used as a Rust identifier in generated code.
    InvalidIdentifier {
        /// What kind of item carries the name
        what: &'static str,
        /// The rejected name
        name: String,
    },
    /// A routing block is unusable.
    InvalidRoute {
        /// Service owning the handler
        service: String,
        /// Handler name
        handler: String,
        /// What is wrong with the route
        reason: String,
    },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::MalformedAnnotation {
                field,
                token,
                reason,
            } => write!(
                f,
                "malformed annotation on {field}: directive '{token}': {reason}"
            ),
            GenerateError::UnsupportedFieldKind { field, declared } => write!(
                f,
                "unsupported field kind on {field}: '{declared}' (only int and string fields are supported)"
            ),
            GenerateError::UnresolvedType {
                service,
                handler,
                reference,
            } => {
                if reference.is_empty() {
                    write!(f, "unresolved type in handler {service}.{handler}: missing type reference")
                } else {
                    write!(
                        f,
                        "unresolved type in handler {service}.{handler}: '{reference}' is not declared"
                    )
                }
            }
            GenerateError::DuplicateDeclaration { what, scope, name } => {
                write!(f, "duplicate {what} '{name}' in {scope}")
            }
            GenerateError::InvalidIdentifier { what, name } => {
                write!(f, "invalid {what} name '{name}': not usable as a Rust identifier")
            }
            GenerateError::InvalidRoute {
                service,
                handler,
                reason,
            } => write!(f, "invalid route on handler {service}.{handler}: {reason}"),
        }
    }
}

impl std::error::Error for GenerateError {}

impl GenerateError {
    /// Short taxonomy name, used by `check` output and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerateError::MalformedAnnotation { .. } => "MalformedAnnotation",
            GenerateError::UnsupportedFieldKind { .. } => "UnsupportedFieldKind",
            GenerateError::UnresolvedType { .. } => "UnresolvedType",
            GenerateError::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            GenerateError::InvalidIdentifier { .. } => "InvalidIdentifier",
            GenerateError::InvalidRoute { .. } => "InvalidRoute",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field_location() {
        let err = GenerateError::MalformedAnnotation {
            field: FieldKey::new("CreateParams", "age"),
            token: "=5".to_string(),
            reason: "empty key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed annotation on CreateParams.age: directive '=5': empty key"
        );
        assert_eq!(err.kind(), "MalformedAnnotation");
    }

    #[test]
    fn test_display_unresolved_missing_reference() {
        let err = GenerateError::UnresolvedType {
            service: "MyApi".to_string(),
            handler: "profile".to_string(),
            reference: String::new(),
        };
        assert!(err.to_string().contains("missing type reference"));
        assert!(err.to_string().contains("MyApi.profile"));
    }
}
