use once_cell::sync::Lazy;
use regex::Regex;

static IDENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex should be valid")
});

const KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
    "where", "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try",
];

/// Keywords that cannot be written as raw identifiers.
const NOT_RAW: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Convert a snake_case string to CamelCase
///
/// Used for envelope names built from handler names.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(to_camel_case("user_profile"), "UserProfile");
/// ```
pub fn to_camel_case(s: &str) -> String {
    s.split('_')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Identifier usable as a type or service name: well formed and not a keyword.
pub fn is_rust_identifier(name: &str) -> bool {
    IDENT_REGEX.is_match(name) && !KEYWORDS.contains(&name) && name != "_"
}

/// Name usable for a struct field or method. Keywords are fine (they are
/// emitted as raw identifiers) except the few that cannot be raw; names with a
/// leading `__` are reserved for generated locals.
pub fn is_usable_field_name(name: &str) -> bool {
    IDENT_REGEX.is_match(name) && !NOT_RAW.contains(&name) && !name.starts_with("__")
}

/// A `::`-separated type path such as `User` or `crate::models::User`.
pub fn is_rust_path(path: &str) -> bool {
    let path = path.strip_prefix("::").unwrap_or(path);
    path.split("::").enumerate().all(|(i, segment)| {
        is_rust_identifier(segment) || (i == 0 && ["crate", "self", "super"].contains(&segment))
    })
}

/// Escape keywords as raw identifiers (`type` → `r#type`).
pub fn sanitize_rust_identifier(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

/// Quote a string as a Rust string literal.
pub fn rust_string_literal(s: &str) -> String {
    format!("{s:?}")
}
