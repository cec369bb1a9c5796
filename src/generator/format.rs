use std::path::Path;
use std::process::Command;

use anyhow::Context;

/// Run rustfmt over a single generated file in place.
pub fn format_file(path: &Path) -> anyhow::Result<()> {
    // Allow tests to override the rustfmt binary path without mutating PATH
    let rustfmt_bin = std::env::var("APIGEN_RUSTFMT_BIN").unwrap_or_else(|_| "rustfmt".to_string());

    let status = Command::new(&rustfmt_bin)
        .arg("--edition")
        .arg("2021")
        .arg(path)
        .status()
        .with_context(|| format!("Failed to run {rustfmt_bin}"))?;
    if !status.success() {
        anyhow::bail!("rustfmt failed on {}", path.display());
    }
    Ok(())
}
