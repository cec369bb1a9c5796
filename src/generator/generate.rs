use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use askama::Template;

use super::binding::StructView;
use super::dispatch::ServiceView;
use super::format::format_file;
use super::naming::rust_string_literal;
use super::templates::{HeaderTemplate, ParamsTemplate, ServiceTemplate};
use crate::config::GeneratorConfig;
use crate::decl::{load_declarations, Declarations};
use crate::model::{build_model, ApiModel};

/// Marker every generated file carries in its first lines.
pub const GENERATED_MARKER: &str = "@generated";

/// How [`generate_file`] treats the output path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Overwrite an existing file even when it lacks the generated marker
    pub force: bool,
    /// Render and report without touching the filesystem
    pub dry_run: bool,
    /// Run rustfmt over the output before comparing and writing
    pub format: bool,
}

/// What happened to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// Existing file already had identical contents
    Unchanged,
    DryRun,
}

/// Summary of one [`generate_file`] run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub out_path: PathBuf,
    pub outcome: WriteOutcome,
    pub services: usize,
    pub endpoints: usize,
    /// Size of the rendered output before formatting
    pub bytes: usize,
}

/// Render the complete generated file for a model.
///
/// Output depends only on the model, the config and `source_name`, so the
/// same input always renders byte-identical text.
pub fn render(
    model: &ApiModel,
    config: &GeneratorConfig,
    source_name: &str,
) -> anyhow::Result<String> {
    let mut sections = Vec::with_capacity(model.services.len() + 2);

    sections.push(
        HeaderTemplate {
            source: source_name.to_string(),
            has_comment: config.header_comment.is_some(),
            comment: config.header_comment.clone().unwrap_or_default(),
        }
        .render()
        .context("Failed to render header")?,
    );

    if !model.types.is_empty() {
        sections.push(
            ParamsTemplate {
                types: model.types.values().map(StructView::new).collect(),
            }
            .render()
            .context("Failed to render parameter types")?,
        );
    }

    for service in model.services.values() {
        let view = ServiceView::new(model, service, config)?;
        let rendered = ServiceTemplate {
            rt: config.runtime_path.clone(),
            credential_header: rust_string_literal(&config.credential_header),
            credential_value: rust_string_literal(&config.credential_value),
            service: view,
        }
        .render()
        .with_context(|| format!("Failed to render service {}", service.name))?;
        sections.push(rendered);
    }

    let mut out = String::new();
    for section in &sections {
        let section = section.trim_matches('\n');
        if section.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(section);
    }
    out.push('\n');
    Ok(out)
}

/// Build the model from declarations and render it.
pub fn generate_source(
    decls: &Declarations,
    config: &GeneratorConfig,
    source_name: &str,
) -> anyhow::Result<String> {
    let model = build_model(decls)?;
    render(&model, config, source_name)
}

/// Full pipeline: load declarations, build the model, render, write.
///
/// Nothing is written unless every step before the write succeeds.
pub fn generate_file(
    decl_path: &Path,
    out_path: &Path,
    config: &GeneratorConfig,
    options: GenerateOptions,
) -> anyhow::Result<GenerationReport> {
    let decls = load_declarations(decl_path)?;
    let model = build_model(&decls)
        .with_context(|| format!("Invalid declarations in {}", decl_path.display()))?;
    let source_name = decl_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| decl_path.display().to_string());
    let rendered = render(&model, config, &source_name)?;

    let outcome = write_output(out_path, &rendered, options)?;
    let report = GenerationReport {
        out_path: out_path.to_path_buf(),
        outcome,
        services: model.services.len(),
        endpoints: model.endpoints().count(),
        bytes: rendered.len(),
    };
    tracing::info!(
        decl = %decl_path.display(),
        out = %out_path.display(),
        services = report.services,
        endpoints = report.endpoints,
        outcome = ?report.outcome,
        "generation finished"
    );
    Ok(report)
}

/// Write rendered output atomically.
///
/// An existing file is only replaced when it carries [`GENERATED_MARKER`]
/// or `force` is set; identical contents are left alone.
pub fn write_output(
    out_path: &Path,
    contents: &str,
    options: GenerateOptions,
) -> anyhow::Result<WriteOutcome> {
    if options.dry_run {
        return Ok(WriteOutcome::DryRun);
    }

    let existing = if out_path.exists() {
        let existing = fs::read(out_path)
            .with_context(|| format!("Failed to read existing output: {}", out_path.display()))?;
        if !options.force && !has_generated_marker(&existing) {
            anyhow::bail!(
                "Refusing to overwrite {}: not a generated file (use --force to overwrite)",
                out_path.display()
            );
        }
        Some(existing)
    } else {
        None
    };

    if !options.format && existing.as_deref() == Some(contents.as_bytes()) {
        tracing::debug!(out = %out_path.display(), "output unchanged");
        return Ok(WriteOutcome::Unchanged);
    }

    let dir = match out_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    let file_name = out_path
        .file_name()
        .with_context(|| format!("Output path has no file name: {}", out_path.display()))?;
    let tmp_path = dir.join(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    fs::write(&tmp_path, contents)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    if options.format {
        if let Err(err) = format_file(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }
        let formatted = fs::read(&tmp_path)
            .with_context(|| format!("Failed to read {}", tmp_path.display()))?;
        if existing.as_deref() == Some(formatted.as_slice()) {
            let _ = fs::remove_file(&tmp_path);
            tracing::debug!(out = %out_path.display(), "output unchanged");
            return Ok(WriteOutcome::Unchanged);
        }
    }
    fs::rename(&tmp_path, out_path).with_context(|| {
        format!(
            "Failed to move {} to {}",
            tmp_path.display(),
            out_path.display()
        )
    })?;
    Ok(WriteOutcome::Written)
}

fn has_generated_marker(contents: &[u8]) -> bool {
    String::from_utf8_lossy(contents)
        .lines()
        .take(5)
        .any(|line| line.contains(GENERATED_MARKER))
}
