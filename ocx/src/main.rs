//! ocx: object-wise discovery and complexity analysis of OCEL 2.0 logs.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use ocel_complexity::config::{ComplexityConfig, load_config};
use ocel_complexity::pipeline::compare_analyses;
use ocel_complexity::utils::log_id_from_path;
use ocel_complexity::{Exportable, Importable, OCEL, analyze_ocel, discover_oc_dfg, extract_relations};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Discover per-object-type directly-follows graphs and measure the complexity of OCEL 2.0 logs
#[derive(Parser, Debug)]
#[command(name = "ocx", version, about, long_about = None)]
struct Cli {
    /// Configuration file (takes precedence over ./ocx.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count the event-object relations in total, per object type and per perspective
    Relations {
        /// OCEL 2.0 JSON log
        log: PathBuf,
    },
    /// Discover one directly-follows graph per object type
    Discover {
        /// OCEL 2.0 JSON log
        log: PathBuf,
        /// Write the models to a JSON file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute the complexity metrics of a log
    Metrics {
        /// OCEL 2.0 JSON log
        log: PathBuf,
        /// Write the metric table to a JSON or CSV file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare the complexity metrics of several logs (identified by file stem)
    Compare {
        /// OCEL 2.0 JSON logs
        #[arg(required = true, num_args = 2..)]
        logs: Vec<PathBuf>,
        /// Write the comparison report to a JSON file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match verbose {
        0 if quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    // RUST_LOG takes precedence over -v/-q
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn import_log(path: &Path) -> anyhow::Result<OCEL> {
    let ocel = OCEL::import_from_path(path)
        .with_context(|| format!("failed to import OCEL from {}", path.display()))?;
    tracing::info!(
        log = %path.display(),
        events = ocel.events.len(),
        objects = ocel.objects.len(),
        "imported log"
    );
    Ok(ocel)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn emit<T: Exportable + Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            value
                .export_to_path(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(output = %path.display(), "wrote result");
            Ok(())
        }
        None => print_json(value),
    }
}

fn compare_logs(
    paths: &[PathBuf],
    config: &ComplexityConfig,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let mut logs: BTreeMap<String, OCEL> = BTreeMap::new();
    for path in paths {
        let log_id = log_id_from_path(path);
        if logs.contains_key(&log_id) {
            bail!("two logs share the identifier '{log_id}' ({})", path.display());
        }
        logs.insert(log_id, import_log(path)?);
    }

    let mut analyses = Vec::with_capacity(logs.len());
    for (log_id, ocel) in &logs {
        let analysis = analyze_ocel(ocel, config)
            .with_context(|| format!("failed to analyze log '{log_id}'"))?;
        analyses.push((log_id.clone(), analysis));
    }
    let report = compare_analyses(analyses)?;
    emit(&report, output)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Relations { log } => {
            let ocel = import_log(&log)?;
            let extraction = extract_relations(&ocel)?;
            print_json(&extraction.relation_counts())
        }
        Command::Discover { log, output } => {
            let ocel = import_log(&log)?;
            let extraction = extract_relations(&ocel)?;
            let models = discover_oc_dfg(&extraction, config.discovery.parallel);
            emit(&models, output.as_deref())
        }
        Command::Metrics { log, output } => {
            let ocel = import_log(&log)?;
            let analysis = analyze_ocel(&ocel, &config)?;
            emit(&analysis.metrics, output.as_deref())
        }
        Command::Compare { logs, output } => compare_logs(&logs, &config, output.as_deref()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    run(cli)
}
