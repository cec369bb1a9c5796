use super::naming::{rust_string_literal, sanitize_rust_identifier};
use crate::model::{Field, FieldKind, ParameterType};

/// Template view of one struct field.
#[derive(Debug, Clone)]
pub struct StructField {
    /// Field identifier, raw-escaped when it is a keyword
    pub ident: String,
    pub rust_type: &'static str,
}

/// Template view of one declared parameter type.
#[derive(Debug, Clone)]
pub struct StructView {
    pub name: String,
    pub fields: Vec<StructField>,
}

impl StructView {
    pub fn new(ty: &ParameterType) -> Self {
        StructView {
            name: ty.name.clone(),
            fields: ty
                .fields
                .iter()
                .map(|f| StructField {
                    ident: sanitize_rust_identifier(&f.name),
                    rust_type: f.kind.rust_type(),
                })
                .collect(),
        }
    }
}

/// Template view of one field's extraction, coercion and checks.
///
/// Every string that ends up in generated code is rendered here, already
/// quoted, so the templates only print.
#[derive(Debug, Clone)]
pub struct FieldBinding {
    /// Struct field identifier
    pub ident: String,
    /// Local variable holding the checked value
    pub local: String,
    pub is_int: bool,
    /// Quoted request key
    pub key: String,
    pub has_alias: bool,
    pub alias: String,
    pub has_default: bool,
    /// Default as an expression of the field's type
    pub default: String,
    pub required: bool,
    pub int_message: String,
    pub empty_message: String,
    pub has_enum: bool,
    /// Allowed values as an array expression
    pub enum_values: String,
    pub enum_message: String,
    pub has_min: bool,
    pub min: i64,
    pub min_message: String,
    pub has_max: bool,
    pub max: i64,
    pub max_message: String,
    /// Expression the bounds are compared against
    pub measure: String,
}

impl FieldBinding {
    pub fn new(field: &Field) -> Self {
        let rules = &field.rules;
        let name = &field.name;
        let is_int = field.kind == FieldKind::Integer;
        let local = format!("{}_value", name.to_lowercase());

        let default = match (&rules.default, field.kind) {
            (Some(d), FieldKind::Integer) => d.clone(),
            (Some(d), FieldKind::String) => format!("String::from({})", rust_string_literal(d)),
            (None, _) => String::new(),
        };
        let enum_values = if is_int {
            format!("[{}]", rules.enum_values.join(", "))
        } else {
            let quoted: Vec<String> = rules
                .enum_values
                .iter()
                .map(|v| rust_string_literal(v))
                .collect();
            format!("[{}]", quoted.join(", "))
        };
        let (measure, bound_label) = if is_int {
            (local.clone(), name.clone())
        } else {
            (format!("{local}.len()"), format!("{name} len"))
        };
        let min = rules.min.unwrap_or_default();
        let max = rules.max.unwrap_or_default();

        FieldBinding {
            ident: sanitize_rust_identifier(name),
            key: rust_string_literal(&field.source_key()),
            has_alias: rules.alias.is_some(),
            alias: rust_string_literal(rules.alias.as_deref().unwrap_or_default()),
            has_default: rules.default.is_some(),
            default,
            required: rules.required,
            int_message: rust_string_literal(&format!("{name} must be int")),
            empty_message: rust_string_literal(&format!("{name} must not be empty")),
            has_enum: !rules.enum_values.is_empty(),
            enum_values,
            enum_message: rust_string_literal(&format!(
                "{name} must be one of [{}]",
                rules.enum_values.join(", ")
            )),
            has_min: rules.min.is_some(),
            min,
            min_message: rust_string_literal(&format!("{bound_label} must be >= {min}")),
            has_max: rules.max.is_some(),
            max,
            max_message: rust_string_literal(&format!("{bound_label} must be <= {max}")),
            measure,
            is_int,
            local,
        }
    }
}
