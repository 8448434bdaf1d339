//! Command-line interface.
//!
//! Provides `infer`, `validate`, and `params` subcommands around the
//! library entry points.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hd_common::{Error, OutputFormat, Result};
use hd_config::{resolve_params, InferenceConfig};
use tracing::debug;

use crate::exit_codes::ExitCode;
use crate::inference::InferenceEngine;
use crate::loader::load_population;

/// Exact gene and trait inference over a family pedigree.
#[derive(Parser, Debug)]
#[command(name = "heredity", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute gene and trait posteriors for every person in a pedigree
    Infer(InferArgs),
    /// Load a pedigree and check its structure
    Validate {
        /// Pedigree file (.csv or .json)
        file: PathBuf,
    },
    /// Print the effective network parameters as JSON
    Params {
        /// Network parameter file (defaults to $HEREDITY_PARAMS, then user config)
        #[arg(long, value_name = "FILE")]
        params: Option<PathBuf>,
    },
}

/// Arguments for the infer command
#[derive(Args, Debug)]
pub struct InferArgs {
    /// Pedigree file (.csv or .json)
    pub file: PathBuf,

    /// Network parameter file (defaults to $HEREDITY_PARAMS, then user config)
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Decimal places kept in percent outputs
    #[arg(long, default_value = "1", conflicts_with = "exact")]
    pub precision: u32,

    /// Keep full precision instead of rounding
    #[arg(long)]
    pub exact: bool,

    /// Largest population accepted
    #[arg(long, default_value = "10")]
    pub max_population: usize,

    /// Enumerate on the calling thread only
    #[arg(long, conflicts_with = "threads")]
    pub sequential: bool,

    /// Worker threads for enumeration (defaults to available cores)
    #[arg(long)]
    pub threads: Option<usize>,
}

impl InferArgs {
    fn config(&self) -> InferenceConfig {
        InferenceConfig {
            max_population: self.max_population,
            precision: (!self.exact).then_some(self.precision),
            parallel: !self.sequential,
            ..InferenceConfig::default()
        }
    }
}

/// Execute a parsed command line and report the outcome.
pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Commands::Infer(args) => run_infer(&args),
        Commands::Validate { file } => run_validate(&file),
        Commands::Params { params } => run_params(params),
    };
    match result {
        Ok(()) => ExitCode::Clean,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::for_error(&e)
        }
    }
}

fn run_infer(args: &InferArgs) -> Result<()> {
    let (params, source) = resolve_params(args.params.as_deref())?;
    debug!(source = %source, "network parameters loaded");
    let population = load_population(&args.file)?;
    let engine = InferenceEngine::new(&params, args.config());

    let report = match args.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| Error::Config(format!("thread pool: {e}")))?;
            pool.install(|| engine.run(&population))?
        }
        None => engine.run(&population)?,
    };

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn run_validate(file: &std::path::Path) -> Result<()> {
    let population = load_population(file)?;
    let founders = population.people().filter(|p| p.is_founder()).count();
    let observed = population
        .people()
        .filter(|p| p.observed_trait.is_some())
        .count();
    println!(
        "{}: {} people ({} founders, {} with observed trait)",
        file.display(),
        population.len(),
        founders,
        observed
    );
    Ok(())
}

fn run_params(explicit: Option<PathBuf>) -> Result<()> {
    let (params, source) = resolve_params(explicit.as_deref())?;
    debug!(source = %source, "network parameters loaded");
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}
