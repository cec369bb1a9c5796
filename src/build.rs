//! Build script support.
//!
//! Generate serving code into `OUT_DIR` from a crate's `build.rs` and pull it
//! in with `include!`:
//!
//! ```rust,ignore
//! // build.rs
//! fn main() -> anyhow::Result<()> {
//!     apigen::build::generate_to_out_dir("api.yaml", "api_gen.rs")?;
//!     Ok(())
//! }
//!
//! // src/lib.rs
//! include!(concat!(env!("OUT_DIR"), "/api_gen.rs"));
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::{config_path_for, resolve_config};
use crate::generator::{generate_file, GenerateOptions};

/// Generate `file_name` inside `OUT_DIR` from the declarations at `decl`.
///
/// Picks up `apigen.toml` next to the declarations and tells cargo to rerun
/// when either file changes. Returns the path written.
pub fn generate_to_out_dir(decl: impl AsRef<Path>, file_name: &str) -> anyhow::Result<PathBuf> {
    let decl = decl.as_ref();
    let out_dir = std::env::var_os("OUT_DIR")
        .context("OUT_DIR is not set; generate_to_out_dir must run from a build script")?;

    println!("cargo:rerun-if-changed={}", decl.display());
    let config_path = config_path_for(decl);
    if config_path.exists() {
        println!("cargo:rerun-if-changed={}", config_path.display());
    }

    let (config, _) = resolve_config(decl, None)?;
    let out_path = Path::new(&out_dir).join(file_name);
    // OUT_DIR belongs to the build; always replace what is there
    let options = GenerateOptions {
        force: true,
        ..GenerateOptions::default()
    };
    generate_file(decl, &out_path, &config, options)?;
    Ok(out_path)
}
