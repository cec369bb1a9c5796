use crate::config::resolve_config;
use crate::decl::load_declarations;
use crate::generator::{generate_file, render, GenerateOptions, WriteOutcome};
use crate::model::{build_model, ApiModel};
use crate::rules::ValidationRule;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Command-line interface for apigen
///
/// Generates validated, routed handler code from annotated declarations.
#[derive(Parser)]
#[command(name = "apigen")]
#[command(about = "apigen code generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate serving code from a declarations file
    Generate {
        /// Path to the declarations file (YAML or JSON)
        #[arg(short, long)]
        decl: PathBuf,

        /// Path of the generated Rust file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Path to the generator config (apigen.toml)
        /// If not provided, will auto-detect alongside the declarations
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Overwrite an existing file even if apigen did not generate it
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Render and print to stdout without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Run rustfmt over the generated file
        #[arg(long, default_value_t = false)]
        fmt: bool,
    },
    /// Validate declarations without generating anything
    Check {
        /// Path to the declarations file (YAML or JSON)
        #[arg(short, long)]
        decl: PathBuf,
    },
    /// Print the services, endpoints and bound fields a declarations file defines
    Inspect {
        /// Path to the declarations file (YAML or JSON)
        #[arg(short, long)]
        decl: PathBuf,
    },
}

/// Parse arguments from the process and run.
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Run an already parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            decl,
            out,
            config,
            force,
            dry_run,
            fmt,
        } => {
            let (config, config_path) = resolve_config(&decl, config.as_deref())?;
            if dry_run {
                let decls = load_declarations(&decl)?;
                let model = build_model(&decls)
                    .with_context(|| format!("Invalid declarations in {}", decl.display()))?;
                let source_name = decl
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                print!("{}", render(&model, &config, &source_name)?);
                return Ok(());
            }

            let out = out.context("--out is required unless --dry-run is given")?;
            if let Some(path) = &config_path {
                println!("⚙️  Using config {}", path.display());
            }
            let options = GenerateOptions {
                force,
                dry_run,
                format: fmt,
            };
            let report = generate_file(&decl, &out, &config, options)?;
            match report.outcome {
                WriteOutcome::Written => println!(
                    "✅ Generated {} ({} services, {} endpoints)",
                    report.out_path.display(),
                    report.services,
                    report.endpoints
                ),
                WriteOutcome::Unchanged => {
                    println!("ℹ️  {} is up to date", report.out_path.display())
                }
                WriteOutcome::DryRun => {}
            }
            Ok(())
        }
        Commands::Check { decl } => {
            let decls = load_declarations(&decl)?;
            match build_model(&decls) {
                Ok(model) => {
                    println!(
                        "✅ {}: {} types, {} services, {} endpoints",
                        decl.display(),
                        model.types.len(),
                        model.services.len(),
                        model.endpoints().count()
                    );
                    Ok(())
                }
                Err(err) => {
                    println!("❌ {}: [{}] {}", decl.display(), err.kind(), err);
                    Err(anyhow::Error::new(err)
                        .context(format!("Invalid declarations in {}", decl.display())))
                }
            }
        }
        Commands::Inspect { decl } => {
            let decls = load_declarations(&decl)?;
            let model = build_model(&decls)
                .with_context(|| format!("Invalid declarations in {}", decl.display()))?;
            print!("{}", describe_model(&model));
            Ok(())
        }
    }
}

/// Human readable listing of every service, endpoint and bound field.
pub(crate) fn describe_model(model: &ApiModel) -> String {
    let mut out = String::new();
    for service in model.services.values() {
        let _ = writeln!(out, "{}", service.name);
        for ep in &service.endpoints {
            let _ = write!(
                out,
                "  {:<4} {} -> {}({}) -> {}",
                ep.method.as_str(),
                ep.url_path,
                ep.handler_name,
                ep.input_type,
                ep.output_type
            );
            if ep.auth_required {
                out.push_str(" [auth]");
            }
            out.push('\n');
            let Some(ty) = model.parameter_type(&ep.input_type) else {
                continue;
            };
            for field in &ty.fields {
                let _ = write!(out, "      {}: {}", field.name, field.kind);
                let rules = describe_rule(&field.rules);
                if !rules.is_empty() {
                    let _ = write!(out, " [{rules}]");
                }
                out.push('\n');
            }
        }
    }
    out
}

fn describe_rule(rule: &ValidationRule) -> String {
    let mut parts = Vec::new();
    if rule.required {
        parts.push("required".to_string());
    }
    if !rule.enum_values.is_empty() {
        parts.push(format!("enum={}", rule.enum_values.join("|")));
    }
    if let Some(default) = &rule.default {
        parts.push(format!("default={default}"));
    }
    if let Some(min) = rule.min {
        parts.push(format!("min={min}"));
    }
    if let Some(max) = rule.max {
        parts.push(format!("max={max}"));
    }
    if let Some(alias) = &rule.alias {
        parts.push(format!("paramname={alias}"));
    }
    parts.join(", ")
}
