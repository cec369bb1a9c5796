//! # CLI Module
//!
//! Command-line front end of the generator, available as the `apigen`
//! binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Render serving code from a declarations file:
//!
//! ```bash
//! apigen generate --decl api.yaml --out src/api_gen.rs
//! ```
//!
//! Options:
//! - `--decl <FILE>` - Declarations file, YAML or JSON (required)
//! - `--out <FILE>` - Generated Rust file (required unless `--dry-run`)
//! - `--config <FILE>` - Generator config (default: `apigen.toml` next to the declarations)
//! - `--force` - Overwrite an existing file that was not generated by apigen
//! - `--dry-run` - Render and print to stdout without writing
//! - `--fmt` - Run rustfmt over the output
//!
//! ### `check`
//!
//! Build the model and report the first problem, exiting non-zero:
//!
//! ```bash
//! apigen check --decl api.yaml
//! ```
//!
//! ### `inspect`
//!
//! List services, endpoints and the fields each endpoint binds:
//!
//! ```bash
//! apigen inspect --decl api.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use apigen::cli::{run, Cli};
//! use clap::Parser;
//!
//! run(Cli::parse())?;
//! ```

mod commands;


pub use commands::{run, run_cli, Cli, Commands};
