//! Ontonorm CLI
//!
//! Drives the normalization pipeline over local ontology repositories:
//! discover candidate documents, merge against the master, enrich with
//! derived metadata, and serialize the canonical target document.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use ontonorm_pipeline::{InvocationContext, Pipeline};
use ontonorm_store::{FileStore, StructuralReasoner, SuffixDiscovery};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ontonorm")]
#[command(author, version, about = "Ontology normalization pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge ontology documents into one canonical target document.
    ///
    /// With `--input-dir`, candidates are discovered by suffix and `--master`
    /// names the file to merge against; without it, `--master` is the path
    /// of the single document to normalize.
    Normalize {
        /// Master document name (or path when no input folder is given).
        #[arg(long)]
        master: String,
        /// Input repository folder to discover candidate documents in.
        #[arg(long)]
        input_dir: Option<PathBuf>,
        /// Output folder for `owlapi.xrdf` and `parsing.log.json`.
        #[arg(long)]
        output_dir: PathBuf,
        /// Version marker to attach when no OBO data version is discovered.
        #[arg(long)]
        obo_version: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Normalize {
            master,
            input_dir,
            output_dir,
            obo_version,
        } => normalize(master, input_dir, output_dir, obo_version),
    }
}

fn normalize(
    master: String,
    input_dir: Option<PathBuf>,
    output_dir: PathBuf,
    obo_version: Option<String>,
) -> Result<()> {
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output folder {}", output_dir.display()))?;

    let mut ctx = InvocationContext::new(master, &output_dir);
    if let Some(dir) = input_dir {
        ctx = ctx.with_input_repository(dir);
    }
    if let Some(version) = obo_version {
        ctx.set_obo_version(version);
    }

    let mut pipeline = Pipeline::new(
        ctx,
        FileStore::new(),
        StructuralReasoner::new(),
        SuffixDiscovery::new(),
    );
    let ok = pipeline.run();
    let ctx = pipeline.into_context();

    for warning in ctx.error_sink.warnings() {
        println!("{} {warning}", "warning:".yellow().bold());
    }
    if !ok {
        for error in ctx.error_sink.errors() {
            eprintln!("{} [{}] {}", "error:".red().bold(), error.kind, error.message);
        }
        bail!(
            "normalization failed; report at {}",
            ctx.report_path().display()
        );
    }

    println!(
        "{} wrote {}",
        "done:".green().bold(),
        ctx.output_document_path().display()
    );
    Ok(())
}
