//! Generator configuration
//!
//! Settings baked into generated code at generation time. They live in an
//! `apigen.toml` next to the declarations file:
//!
//! ```toml
//! credential_header = "X-Auth"
//! credential_value = "100500"
//! runtime_path = "::apigen::runtime"
//! ```
//!
//! Every key is optional. A missing file means defaults; a file that exists
//! but does not parse is an error.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up alongside the declarations.
pub const CONFIG_FILE_NAME: &str = "apigen.toml";

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Header carrying the trusted-caller credential on auth-required endpoints
    pub credential_header: String,
    /// Exact value the credential header must carry
    pub credential_value: String,
    /// Path generated code uses to reach the runtime support module
    pub runtime_path: String,
    /// Extra comment line written under the generated-file marker
    pub header_comment: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            credential_header: "X-Auth".to_string(),
            credential_value: "100500".to_string(),
            runtime_path: "::apigen::runtime".to_string(),
            header_comment: None,
        }
    }
}

impl GeneratorConfig {
    /// Check values that end up inside generated code.
    pub fn validate(&self) -> anyhow::Result<()> {
        if http::HeaderName::from_bytes(self.credential_header.as_bytes()).is_err() {
            anyhow::bail!("credential_header '{}' is not a valid header name", self.credential_header);
        }
        if !crate::generator::is_rust_path(&self.runtime_path) {
            anyhow::bail!("runtime_path '{}' is not a Rust path", self.runtime_path);
        }
        if let Some(comment) = &self.header_comment {
            if comment.contains('\n') {
                anyhow::bail!("header_comment must be a single line");
            }
        }
        Ok(())
    }
}

/// Path of the config file expected next to a declarations file.
pub fn config_path_for(decl_path: &Path) -> PathBuf {
    decl_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CONFIG_FILE_NAME)
}

/// Load configuration from a TOML file
///
/// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but fails
/// to read, parse or validate.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read generator config: {}", config_path.display()))?;
    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse generator config: {}", config_path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid generator config: {}", config_path.display()))?;
    Ok(Some(config))
}

/// Resolve the configuration for a run: an explicit path wins, otherwise the
/// file next to the declarations, otherwise defaults.
pub fn resolve_config(
    decl_path: &Path,
    explicit: Option<&Path>,
) -> anyhow::Result<(GeneratorConfig, Option<PathBuf>)> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config_path_for(decl_path));
    match load_config(&path)? {
        Some(config) => {
            tracing::debug!(path = %path.display(), "loaded generator config");
            Ok((config, Some(path)))
        }
        None if explicit.is_some() => {
            anyhow::bail!("Generator config not found: {}", path.display())
        }
        None => Ok((GeneratorConfig::default(), None)),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.credential_header, "X-Auth");
        assert_eq!(config.credential_value, "100500");
        assert_eq!(config.runtime_path, "::apigen::runtime");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "credential_value = \"secret\"\n").unwrap();
        let config = load_config(&path).unwrap().unwrap();
        assert_eq!(config.credential_value, "secret");
        assert_eq!(config.credential_header, "X-Auth");
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap().is_none());
    }

    #[test]
    fn test_unknown_key_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "credential = \"x\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_invalid_header_name_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "credential_header = \"bad header\"\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("not a valid header name"));
    }

    #[test]
    fn test_resolve_config_auto_detects() {
        let dir = tempfile::tempdir().unwrap();
        let decl = dir.path().join("api.yaml");
        let (config, found) = resolve_config(&decl, None).unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert!(found.is_none());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "runtime_path = \"crate::rt\"\n").unwrap();
        let (config, found) = resolve_config(&decl, None).unwrap();
        assert_eq!(config.runtime_path, "crate::rt");
        assert!(found.is_some());
    }

    #[test]
    fn test_resolve_config_explicit_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let decl = dir.path().join("api.yaml");
        let missing = dir.path().join("other.toml");
        assert!(resolve_config(&decl, Some(&missing)).is_err());
    }
}
