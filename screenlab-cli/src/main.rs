//! Screenlab CLI: build, summarize and inspect universe snapshot reports.
//!
//! Commands:
//! - `build`: ingest the newest (or a given) snapshot, aggregate, write the report artifact
//! - `summary`: same pipeline, prints the summary and sector breakdown only
//! - `inspect`: show what ingestion made of one file (metadata, columns, notes)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use screenlab_core::data::{FixedPath, SourceSelector};
use screenlab_core::{Dataset, RawSource};
use screenlab_runner::content::ReportSection;
use screenlab_runner::{
    parse_snapshot, renderer_for, run_report, save_report, OutputFormat, ReportConfig, ReportRun,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "screenlab",
    about = "Screenlab CLI: stock-universe snapshot reports"
)]
struct Cli {
    /// Log at debug level (overrides RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the report artifact.
    Build {
        #[command(flatten)]
        run: RunArgs,

        /// Output directory for the artifact. Overrides [output].dir.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Artifact format: markdown or json. Overrides [output].format.
        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Run ingestion and aggregation; print the summary without writing anything.
    Summary {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Show metadata, columns and data-quality notes for one snapshot file.
    Inspect {
        /// Snapshot file to inspect.
        #[arg(long)]
        source: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Explicit snapshot file. Skips newest-file selection.
    #[arg(long, conflicts_with = "source_dir")]
    source: Option<PathBuf>,

    /// Directory to search for the newest export. Overrides [source].dir.
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Number of rows in the top-K table. Overrides [report].top_k.
    #[arg(long)]
    top_k: Option<usize>,
}

impl RunArgs {
    /// Load the config file (or defaults) and apply flag overrides.
    fn resolve(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)?,
            None => ReportConfig::default(),
        };
        if let Some(dir) = &self.source_dir {
            config.source.dir = dir.clone();
        }
        if let Some(k) = self.top_k {
            config.report.top_k = k;
        }
        config.validate()?;
        Ok(config)
    }

    fn selector(&self, config: &ReportConfig) -> Box<dyn SourceSelector> {
        match &self.source {
            Some(path) => Box::new(FixedPath(path.clone())),
            None => config.selector(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            run,
            output_dir,
            format,
        } => run_build(&run, output_dir, format),
        Commands::Summary { run } => run_summary(&run),
        Commands::Inspect { source } => run_inspect(source),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(args: &RunArgs, config: &ReportConfig) -> Result<ReportRun> {
    let selector = args.selector(config);
    tracing::debug!(source = %selector.describe(), "selecting snapshot");
    run_report(selector.as_ref(), &config.report)
        .with_context(|| format!("report run failed for {}", selector.describe()))
}

fn run_build(
    args: &RunArgs,
    output_dir: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let mut config = args.resolve()?;
    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }
    if let Some(format) = format {
        config.output.format = format;
    }

    let run = execute(args, &config)?;
    print_summary(&run);

    let renderer = renderer_for(config.output.format);
    let path = save_report(
        &run.model,
        renderer.as_ref(),
        &config.output.dir,
        &config.output.stem,
    )?;
    println!("Report saved to: {}", path.display());

    Ok(())
}

fn run_summary(args: &RunArgs) -> Result<()> {
    let config = args.resolve()?;
    let run = execute(args, &config)?;
    print_summary(&run);
    Ok(())
}

fn run_inspect(path: PathBuf) -> Result<()> {
    let source = RawSource::from_path(&path)?;
    let snapshot = parse_snapshot(source)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let meta = &snapshot.metadata;
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "(missing)".into());

    println!();
    println!("=== Snapshot ===");
    println!("File:           {}", path.display());
    println!("Fingerprint:    {}", snapshot.source.fingerprint());
    println!("Title:          {}", show(&meta.title));
    println!("Date:           {}", show(&meta.date));
    println!("Notes:          {}", show(&meta.notes));
    println!();
    print_columns(&snapshot.dataset);
    print_notes(&snapshot.dataset);
    println!();

    Ok(())
}

fn print_columns(ds: &Dataset) {
    println!("--- Table ---");
    println!("Rows:           {}", ds.len());
    println!("Columns:        {}", ds.columns.join(", "));
    if ds.dropped_columns.is_empty() {
        println!("Dropped:        (none)");
    } else {
        println!("Dropped:        {}", ds.dropped_columns.join(", "));
    }
    let valued = ds.mkt_caps().count();
    println!("With MktCap:    {valued} of {}", ds.len());
}

fn print_notes(ds: &Dataset) {
    if ds.notes.is_empty() {
        return;
    }
    println!();
    for note in &ds.notes {
        println!("WARNING: {note}");
    }
}

fn print_summary(run: &ReportRun) {
    println!();
    for section in &run.model.sections {
        match section {
            ReportSection::Title(t) => {
                println!("=== {} ===", t.title);
                println!("{}", t.subtitle);
                println!("Notes: {}", t.notes);
            }
            ReportSection::Summary(s) => {
                println!();
                println!("--- {} ---", s.heading);
                for line in &s.lines {
                    println!("{:<24}{}", format!("{}:", line.label), line.value);
                }
            }
            ReportSection::Breakdown(b) => {
                println!();
                println!("--- {} ---", b.heading);
                println!("{}", b.caption);
                for row in &b.rows {
                    println!("  {}", row.display());
                }
            }
            ReportSection::Table(t) => {
                println!();
                println!("--- {} ---", t.heading);
                if let [ticker, name, cap, sector] = t.headers.as_slice() {
                    println!("{:<8} {:<40} {:>18} {:<12}", ticker, name, cap, sector);
                    println!("{}", "-".repeat(81));
                }
                for row in &t.rows {
                    let [ticker, name, cap, sector] = row.cells();
                    println!("{:<8} {:<40} {:>18} {:<12}", ticker, name, cap, sector);
                }
            }
        }
    }
    print_notes(&run.dataset);
    println!();
}
