#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use texreport::annotate_cmd::{self, AnnotateArgs};
use texreport::frame_cmd::{self, FrameArgs};
use texreport::table_cmd::{self, TableArgs};
use texreport::{TexResult, consolidate_cmd, resolve_config};

#[derive(Parser, Debug)]
#[command(name = "texreport")]
#[command(about = "Publication-ready LaTeX tables and significance annotations", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set TEXREPORT_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    /// Config file (TOML, or YAML by extension); defaults to ./texreport.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the tables directory
    #[arg(long, global = true)]
    tables_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Format a fitted model or summary table into a captioned table
    Table {
        /// Artifact name (file stem under the tables directory)
        #[arg(long)]
        name: String,
        /// Model summary JSON (parameters + statistics)
        #[arg(long, conflicts_with = "summary")]
        model: Option<PathBuf>,
        /// Summary table CSV; first column holds row labels
        #[arg(long)]
        summary: Option<PathBuf>,
        #[arg(long)]
        caption: Option<String>,
        /// Defaults to tab:<name>
        #[arg(long)]
        label: Option<String>,
        /// Omit the AIC and observation rows
        #[arg(long)]
        no_info: bool,
    },

    /// Render a CSV frame directly as a table
    Frame {
        #[arg(long)]
        name: String,
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        caption: Option<String>,
        #[arg(long)]
        label: Option<String>,
        /// Do not escape reserved LaTeX characters
        #[arg(long)]
        no_escape: bool,
    },

    /// Concatenate every registered table into supplementary_materials.tex
    Consolidate {
        /// Prefix each table with a \section* header
        #[arg(long)]
        add_header: bool,
    },

    /// Forget the registered table order
    Reset,

    /// Lay out significance brackets for pairwise tests
    Annotate {
        /// Pairwise test results (JSON array)
        #[arg(long)]
        tests: PathBuf,
        /// Category labels in axis order, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        categories: Vec<String>,
        /// Height of the first bracket in data units
        #[arg(long, default_value_t = 1.0)]
        baseline: f64,
        #[arg(long)]
        low_offset: Option<f64>,
        /// Write drawing calls as JSON to this file (stdout otherwise)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("TEXREPORT_LOG").unwrap_or_else(|_| {
        if verbose { "texreport=debug".to_string() } else { "texreport=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn run(cli: Cli) -> TexResult<()> {
    let mut config = resolve_config(cli.config.as_deref())?;
    if let Some(dir) = cli.tables_dir {
        config.paths.tables_dir = dir;
    }

    match cli.command {
        Commands::Table { name, model, summary, caption, label, no_info } => {
            table_cmd::run(&config, TableArgs { name, model, summary, caption, label, no_info })?;
        }
        Commands::Frame { name, csv, caption, label, no_escape } => {
            frame_cmd::run(&config, FrameArgs { name, csv, caption, label, no_escape })?;
        }
        Commands::Consolidate { add_header } => {
            consolidate_cmd::run(&config, add_header)?;
        }
        Commands::Reset => consolidate_cmd::reset(&config)?,
        Commands::Annotate { tests, categories, baseline, low_offset, out } => {
            annotate_cmd::run(&config, AnnotateArgs { tests, categories, baseline, low_offset, out })?;
        }
    }
    Ok(())
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
