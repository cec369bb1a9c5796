//! # Rule Extractor
//!
//! Turns the raw per-field annotation string into a [`ValidationRule`].
//!
//! Annotations are comma separated directives of the form
//! `key[=value[|value2|...]]`:
//!
//! ```text
//! required,min=0,max=128
//! enum=user|moderator|admin,default=user
//! paramname=full_name
//! ```
//!
//! Parsing is two steps: [`tokenize`] splits the string into [`Directive`]s,
//! then each directive is dispatched through the rule table. Unknown keys are
//! ignored so newer annotations keep working with older generators; anything
//! structurally broken is a [`GenerateError::MalformedAnnotation`] naming the
//! field and the directive.

use crate::error::GenerateError;
use crate::model::{FieldKey, FieldKind};

/// Validation constraints attached to one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRule {
    /// Reject an empty effective value (checked after default substitution)
    pub required: bool,
    /// Allowed values in declared order; empty means unconstrained
    pub enum_values: Vec<String>,
    /// Lower bound: value for integers, byte length for strings
    pub min: Option<i64>,
    /// Upper bound: value for integers, byte length for strings
    pub max: Option<i64>,
    /// Alternate request key consulted before the field's own name
    pub alias: Option<String>,
    /// Fallback used when the effective value is empty; canonical decimal
    /// text for integer fields
    pub default: Option<String>,
}

impl ValidationRule {
    /// True when no constraint of any kind is configured.
    pub fn is_unconstrained(&self) -> bool {
        *self == ValidationRule::default()
    }
}

/// One `key[=value]` directive as written in an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// The directive text, trimmed
    pub raw: &'a str,
    /// Text before the first `=`
    pub key: &'a str,
    /// Text after the first `=`, if any
    pub value: Option<&'a str>,
}

/// Keys the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKey {
    Required,
    Min,
    Max,
    ParamName,
    Default,
    Enum,
}

const RULE_TABLE: &[(&str, RuleKey)] = &[
    ("required", RuleKey::Required),
    ("min", RuleKey::Min),
    ("max", RuleKey::Max),
    ("paramname", RuleKey::ParamName),
    ("default", RuleKey::Default),
    ("enum", RuleKey::Enum),
];

fn lookup(key: &str) -> Option<RuleKey> {
    RULE_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, rule)| *rule)
}

/// Split an annotation into directives.
///
/// Returns the offending token and a reason when a directive is empty or has
/// an empty key.
pub fn tokenize(raw: &str) -> Result<Vec<Directive<'_>>, (String, String)> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(|token| {
            let token = token.trim();
            if token.is_empty() {
                return Err((token.to_string(), "empty directive".to_string()));
            }
            let (key, value) = match token.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (token, None),
            };
            if key.is_empty() {
                return Err((token.to_string(), "empty key".to_string()));
            }
            Ok(Directive {
                raw: token,
                key,
                value,
            })
        })
        .collect()
}

/// Parse one field's annotation into a rule.
///
/// `kind` is the field's declared kind; it decides how bounds, defaults and
/// enum members are checked.
pub fn parse_annotation(
    field: &FieldKey,
    kind: FieldKind,
    raw: &str,
) -> Result<ValidationRule, GenerateError> {
    let malformed = |token: &str, reason: &str| GenerateError::MalformedAnnotation {
        field: field.clone(),
        token: token.to_string(),
        reason: reason.to_string(),
    };

    let directives = tokenize(raw).map_err(|(token, reason)| malformed(&token, &reason))?;
    let mut rule = ValidationRule::default();

    for directive in directives {
        let Some(value) = directive.value else {
            match lookup(directive.key) {
                Some(RuleKey::Required) => rule.required = true,
                Some(_) => return Err(malformed(directive.raw, "missing value")),
                None => ignore_unknown(field, directive.raw),
            }
            continue;
        };

        if value.contains('|') {
            rule.enum_values = enum_members(value)
                .map(|members| check_members(kind, members))
                .ok_or_else(|| malformed(directive.raw, "empty enum member"))?
                .map_err(|reason| malformed(directive.raw, &reason))?;
            continue;
        }

        let Some(key) = lookup(directive.key) else {
            ignore_unknown(field, directive.raw);
            continue;
        };
        if value.is_empty() {
            return Err(malformed(directive.raw, "missing value"));
        }
        match key {
            RuleKey::Required => return Err(malformed(directive.raw, "required takes no value")),
            RuleKey::Min => rule.min = Some(parse_bound(kind, value).map_err(|r| malformed(directive.raw, &r))?),
            RuleKey::Max => rule.max = Some(parse_bound(kind, value).map_err(|r| malformed(directive.raw, &r))?),
            RuleKey::ParamName => rule.alias = Some(value.to_string()),
            RuleKey::Default => {
                rule.default = Some(match kind {
                    FieldKind::Integer => value
                        .parse::<i64>()
                        .map(|n| n.to_string())
                        .map_err(|_| malformed(directive.raw, "default of an int field must be an integer"))?,
                    FieldKind::String => value.to_string(),
                });
            }
            RuleKey::Enum => {
                rule.enum_values = check_members(kind, vec![value.to_string()])
                    .map_err(|reason| malformed(directive.raw, &reason))?;
            }
        }
    }

    if let (Some(min), Some(max)) = (rule.min, rule.max) {
        if min > max {
            return Err(malformed(raw.trim(), "min is greater than max"));
        }
    }
    if let Some(default) = &rule.default {
        if !rule.enum_values.is_empty() && !rule.enum_values.contains(default) {
            tracing::warn!(field = %field, default = %default, "default is not one of the enum values");
        }
    }
    Ok(rule)
}

fn ignore_unknown(field: &FieldKey, directive: &str) {
    tracing::warn!(field = %field, directive, "ignoring unknown annotation directive");
}

/// Pipe-separated members, tolerating `[a|b]` brackets. `None` if any member is empty.
fn enum_members(value: &str) -> Option<Vec<String>> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    let members: Vec<String> = inner.split('|').map(|m| m.trim().to_string()).collect();
    if members.iter().any(String::is_empty) {
        None
    } else {
        Some(members)
    }
}

/// Integer members come back in canonical decimal form (`+1` becomes `1`).
fn check_members(kind: FieldKind, members: Vec<String>) -> Result<Vec<String>, String> {
    if kind == FieldKind::String {
        return Ok(members);
    }
    members
        .into_iter()
        .map(|m| {
            m.parse::<i64>()
                .map(|n| n.to_string())
                .map_err(|_| format!("enum member '{m}' of an int field must be an integer"))
        })
        .collect()
}

fn parse_bound(kind: FieldKind, value: &str) -> Result<i64, String> {
    let bound: i64 = value
        .parse()
        .map_err(|_| format!("bound '{value}' is not an integer"))?;
    if kind == FieldKind::String && bound < 0 {
        return Err(format!("length bound '{value}' must not be negative"));
    }
    Ok(bound)
}
