use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};
use streamline::{
    MergeAssembler, MergeMode, config::Config, ingest::load_files, report::render_report,
    workspace::Workspace,
};

#[derive(Parser, Debug)]
#[command(name = "streamline")]
#[command(about = "Merge Dart library files into a single file with sorted, deduplicated imports")]
#[command(version)]
struct Cli {
    /// Source files or directories, in merge order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output file for the merged source
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print the merged source to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Merge mode: strict refuses entry-point collisions
    #[arg(short, long, value_enum)]
    mode: Option<MergeMode>,

    /// Only analyze and print diagnostics
    #[arg(long)]
    check: bool,

    /// Explicit configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    debug!("Effective configuration: {config:?}");

    let mut workspace = Workspace::new();
    load_files(&mut workspace, &cli.files, &config)?;
    if workspace.is_empty() {
        bail!("No source files to merge");
    }

    let file_count = workspace.len();
    let analysis = workspace.analyze();
    let report = render_report(analysis, file_count, config.mode);

    let mut stdout = io::stdout().lock();
    if cli.check {
        stdout.write_all(report.as_bytes())?;
        return config.mode.check(analysis);
    }
    if !cli.stdout {
        stdout.write_all(report.as_bytes())?;
    }

    let assembler = MergeAssembler::with_header(&config.header);
    let merged = workspace.merge(&assembler, config.mode)?;

    if cli.stdout {
        stdout.write_all(merged.as_bytes())?;
    } else {
        std::fs::write(&config.output, merged)
            .with_context(|| format!("Failed to write {}", config.output.display()))?;
        info!(
            "Merged {} files into {}",
            file_count,
            config.output.display()
        );
    }
    Ok(())
}
