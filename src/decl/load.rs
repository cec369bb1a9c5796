use super::types::Declarations;
use anyhow::Context;
use std::path::Path;

/// Serialization format of a declarations document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclFormat {
    Yaml,
    Json,
}

impl DeclFormat {
    /// Pick the format from a file extension; anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DeclFormat::Json,
            _ => DeclFormat::Yaml,
        }
    }
}

/// Parse a declarations document held in memory.
pub fn parse_declarations(text: &str, format: DeclFormat) -> anyhow::Result<Declarations> {
    let decls = match format {
        DeclFormat::Yaml => serde_yaml::from_str(text).context("invalid YAML declarations")?,
        DeclFormat::Json => serde_json::from_str(text).context("invalid JSON declarations")?,
    };
    Ok(decls)
}

/// Load a declarations file (YAML or JSON by extension).
pub fn load_declarations(path: &Path) -> anyhow::Result<Declarations> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read declarations: {}", path.display()))?;
    let decls = parse_declarations(&content, DeclFormat::from_path(path))
        .with_context(|| format!("Failed to parse declarations: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        types = decls.types.len(),
        handlers = decls.handlers.len(),
        "loaded declarations"
    );
    Ok(decls)
}
