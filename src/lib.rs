//! # apigen
//!
//! **apigen** is a build-time generator that turns declared input types with
//! per-field validation annotations, plus handler routing declarations, into
//! ready-to-run request-serving Rust code.
//!
//! ## Overview
//!
//! A declarations file lists parameter types and handlers:
//!
//! ```yaml
//! types:
//!   - name: CreateParams
//!     fields:
//!       - { name: login, type: string, annotation: "required,min=3" }
//!       - { name: role, type: string, annotation: "enum=user|moderator|admin,default=user" }
//!       - { name: age, type: int, annotation: "min=0,max=128" }
//! handlers:
//!   - name: create
//!     service: MyApi
//!     input: CreateParams
//!     output: NewUser
//!     api: { url: /user/create, method: POST, auth: true }
//! ```
//!
//! From it apigen emits the `CreateParams` struct, a `serve_http` dispatcher on
//! `MyApi` matching request paths exactly, and one wrapper per endpoint that
//! gates the method and credential, extracts and coerces parameters, applies
//! defaults and checks, calls the business method, and answers with a JSON
//! envelope. The service author only writes the business methods:
//!
//! ```rust,ignore
//! impl MyApi {
//!     fn create(&self, ctx: &RequestContext, params: CreateParams) -> Result<NewUser, ApiError> {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - **[`decl`]** - Loading declarations from YAML or JSON
//! - **[`rules`]** - Annotation tokenizer and rule extraction
//! - **[`model`]** - The per-run model of parameter types and routed endpoints
//! - **[`generator`]** - Askama-based rendering and output handling
//! - **[`runtime`]** - Types the generated code is written against
//! - **[`config`]** - Generator settings from `apigen.toml`
//! - **[`build`]** - Build script entry point
//! - **[`cli`]** - The `apigen` command
//! - **[`logging`]** - `tracing` subscriber setup for binaries
//!
//! ```text
//! declarations → rules + model builder → ApiModel → templates → generated file
//! ```
//!
//! Generation is a single pass; the first error aborts the run and nothing is
//! written.

pub mod build;
pub mod cli;
pub mod config;
pub mod decl;
pub mod error;
pub mod generator;
pub mod logging;
pub mod model;
pub mod rules;
pub mod runtime;

pub use config::GeneratorConfig;
pub use error::GenerateError;
pub use generator::{generate_file, generate_source, GenerateOptions};
pub use model::{build_model, ApiModel};
