//! Lease Contract Command Line Interface
//!
//! Renders contracts from a context file, checks clause catalogs and moves
//! the record store in and out of backup files.
//!
//! # Usage
//!
//! ```bash
//! # Render contract text from a YAML or JSON context
//! lease_cli render --context contract.yaml --default-template
//!
//! # Feminine ordinal word for a clause number
//! lease_cli ordinal 21
//!
//! # Check a clause catalog for placeholders that will not be substituted
//! lease_cli lint --clauses config/
//!
//! # Printable HTML
//! lease_cli export-html --context contract.yaml --output contract.html
//!
//! # Backup the data directory (LEASE_DATA_DIR, default ./data)
//! lease_cli backup export
//! lease_cli backup import lease_contract_backup_2025-03-01.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use lease_contracts::backup::Backup;
use lease_contracts::catalog::{
    default_clauses, default_guarantor_template, default_template, load_catalog_dir,
    load_catalog_file,
};
use lease_contracts::config::LeaseConfig;
use lease_contracts::export::HtmlExporter;
use lease_contracts::i18n::{Language, Translations};
use lease_contracts::lint::lint_catalog;
use lease_contracts::store::RecordStore;
use lease_contracts::{format_contract, ordinal_word, Clause, GenerationContext};

#[derive(Parser)]
#[command(name = "lease_cli")]
#[command(version)]
#[command(about = "Residential lease contract generation")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Language for marital-status words and labels (overrides LEASE_LANGUAGE)
    #[arg(long, short = 'l', global = true, value_enum)]
    language: Option<LanguageArg>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LanguageArg {
    Pt,
    En,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Pt => Language::Pt,
            LanguageArg::En => Language::En,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble contract text from a context file
    Render {
        /// Context file (YAML or JSON)
        #[arg(short, long)]
        context: PathBuf,

        /// Clause catalog file or directory (defaults to LEASE_CLAUSES_DIR, then built-ins)
        #[arg(long)]
        clauses: Option<PathBuf>,

        /// Use the built-in template when the context names none
        #[arg(long)]
        default_template: bool,
    },

    /// Print the ordinal word used to number a clause
    Ordinal {
        /// Clause position, starting at 1
        position: i64,
    },

    /// Report bare tokens and unknown placeholders in a clause catalog
    Lint {
        /// Clause catalog file or directory (defaults to LEASE_CLAUSES_DIR, then built-ins)
        #[arg(long)]
        clauses: Option<PathBuf>,
    },

    /// Render a context to printable HTML
    ExportHtml {
        /// Context file (YAML or JSON)
        #[arg(short, long)]
        context: PathBuf,

        /// Clause catalog file or directory
        #[arg(long)]
        clauses: Option<PathBuf>,

        /// Use the built-in template when the context names none
        #[arg(long)]
        default_template: bool,

        /// Year printed on the signing line (defaults to the start date's year)
        #[arg(long)]
        year: Option<i32>,

        /// Output file (prints to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export or import the record store
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },
}

#[derive(Subcommand)]
enum BackupAction {
    /// Write every collection to a backup file
    Export {
        /// Output file (defaults to lease_contract_backup_<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge a backup file into the store
    Import {
        /// Backup file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = LeaseConfig::from_env();
    if let Some(language) = cli.language {
        config.language = language.into();
    }

    let result = match cli.command {
        Commands::Render {
            context,
            clauses,
            default_template,
        } => cmd_render(&config, &context, clauses.as_deref(), default_template),
        Commands::Ordinal { position } => {
            println!("{}", ordinal_word(position));
            Ok(())
        }
        Commands::Lint { clauses } => cmd_lint(&config, clauses.as_deref()),
        Commands::ExportHtml {
            context,
            clauses,
            default_template,
            year,
            output,
        } => cmd_export_html(
            &config,
            &context,
            clauses.as_deref(),
            default_template,
            year,
            output.as_deref(),
        ),
        Commands::Backup { action } => match action {
            BackupAction::Export { output } => cmd_backup_export(&config, output),
            BackupAction::Import { file } => cmd_backup_import(&config, &file),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_render(
    config: &LeaseConfig,
    context: &Path,
    clauses: Option<&Path>,
    use_default: bool,
) -> Result<()> {
    let ctx = load_context(context, use_default)?;
    let clauses = load_clauses(config, clauses)?;
    let text = format_contract(&ctx, &clauses, &Translations::new(config.language));
    if text.is_empty() {
        bail!(
            "{} names no template; pass --default-template to use the built-in one",
            context.display()
        );
    }
    println!("{}", text);
    Ok(())
}

fn cmd_lint(config: &LeaseConfig, clauses: Option<&Path>) -> Result<()> {
    let clauses = load_clauses(config, clauses)?;
    let report = lint_catalog(&clauses);

    for (id, findings) in &report {
        println!("{}", id.cyan().bold());
        for finding in findings {
            println!("  {} {}", "warning".yellow(), finding);
        }
    }

    if report.is_empty() {
        println!("{} {} clauses checked", "OK".green().bold(), clauses.len());
        Ok(())
    } else {
        bail!("{} of {} clauses have findings", report.len(), clauses.len())
    }
}

fn cmd_export_html(
    config: &LeaseConfig,
    context: &Path,
    clauses: Option<&Path>,
    use_default: bool,
    year: Option<i32>,
    output: Option<&Path>,
) -> Result<()> {
    let ctx = load_context(context, use_default)?;
    let clauses = load_clauses(config, clauses)?;
    let translations = Translations::new(config.language);

    let text = format_contract(&ctx, &clauses, &translations);
    if text.is_empty() {
        bail!("{} names no template", context.display());
    }

    let year = year
        .or_else(|| ctx.start_date.map(|d| d.year()))
        .unwrap_or_else(|| Utc::now().year());
    let html = HtmlExporter::new(translations)?.render(&text, &ctx, year)?;

    match output {
        Some(path) => {
            std::fs::write(path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} wrote {}", "OK".green().bold(), path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}

fn cmd_backup_export(config: &LeaseConfig, output: Option<PathBuf>) -> Result<()> {
    let store = RecordStore::local(&config.data_dir);
    let backup = Backup::collect(&store)?;
    let path = output.unwrap_or_else(|| PathBuf::from(Backup::file_name(Utc::now().date_naive())));

    std::fs::write(&path, backup.to_json()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} {} landlords, {} properties, {} contracts -> {}",
        "OK".green().bold(),
        backup.landlords.len(),
        backup.properties.len(),
        backup.generated_contracts.len(),
        path.display()
    );
    Ok(())
}

fn cmd_backup_import(config: &LeaseConfig, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let backup = Backup::from_json(&raw)?;

    let store = RecordStore::local(&config.data_dir);
    let summary = backup.restore(&store)?;

    println!(
        "{} imported {} landlords, {} properties, {} templates, {} clauses, {} contracts into {}",
        "OK".green().bold(),
        summary.landlords,
        summary.properties,
        summary.templates,
        summary.clauses,
        summary.generated_contracts,
        config.data_dir.display()
    );
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn load_context(path: &Path, use_default: bool) -> Result<GenerationContext> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut ctx: GenerationContext = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if ctx.template.is_none() && use_default {
        let template = if ctx.named_guarantor().is_some() {
            default_guarantor_template()
        } else {
            default_template()
        };
        ctx.template = Some(template);
    }
    Ok(ctx)
}

/// Explicit path first, then the configured directory, then the built-ins
fn load_clauses(config: &LeaseConfig, explicit: Option<&Path>) -> Result<Vec<Clause>> {
    let path = explicit.or(config.clauses_dir.as_deref());
    match path {
        Some(p) if p.is_dir() => load_catalog_dir(p),
        Some(p) => load_catalog_file(p),
        None => Ok(default_clauses()),
    }
}
