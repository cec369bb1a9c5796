//! # Generator Module
//!
//! Turns an [`ApiModel`](crate::model::ApiModel) into one self-contained Rust
//! source file: the declared parameter structs, one envelope alias per
//! endpoint, and per service a path dispatcher plus one wrapper per endpoint.
//!
//! ## Architecture
//!
//! The generator uses Askama templates to produce Rust code:
//!
//! ```text
//! Declarations → Model → Views → Template Rendering → Generated File
//! ```
//!
//! 1. **Views** - [`binding`] and [`dispatch`] precompute every identifier,
//!    literal and message from the model, so templates only print
//! 2. **Template Rendering** - header, parameter structs and one section per
//!    service, rendered in declaration order
//! 3. **Output** - written atomically, skipped when unchanged, optionally
//!    passed through rustfmt
//!
//! ## Generated Wrapper
//!
//! Each wrapper runs the same fixed sequence: method gate (406), credential
//! check (403), parameter extraction, integer coercion, default substitution,
//! required/enum/bounds checks (400), binding, then the business call whose
//! result becomes a JSON envelope.
//!
//! ```rust,ignore
//! let report = apigen::generator::generate_file(
//!     Path::new("api.yaml"),
//!     Path::new("src/api_gen.rs"),
//!     &GeneratorConfig::default(),
//!     GenerateOptions::default(),
//! )?;
//! ```
//!
//! Generated code reaches the support types through the configured runtime
//! path (`::apigen::runtime` by default) and never emits `use` items or inner
//! attributes, so it can be pulled in with `include!`.

pub mod binding;
pub mod dispatch;
mod format;
mod generate;
mod naming;
mod templates;


pub use format::format_file;
pub use generate::{
    generate_file, generate_source, render, write_output, GenerateOptions, GenerationReport,
    WriteOutcome, GENERATED_MARKER,
};
pub use naming::{
    is_rust_identifier, is_rust_path, is_usable_field_name, rust_string_literal,
    sanitize_rust_identifier, to_camel_case,
};
