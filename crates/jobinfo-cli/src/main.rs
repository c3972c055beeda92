//! jobinfo - replay host callbacks through the job lifecycle controller.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jobinfo_core::impls::RecordingSink;
use jobinfo_core::ports::{SystemUserDirectory, UserDirectory};
use jobinfo_core::snapshot::render;
use jobinfo_core::{ControllerBuilder, JobInfoConfig, JobRecord};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod replay;

#[derive(Parser, Debug)]
#[command(name = "jobinfo")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Snapshot file (overrides LDMS_JOBINFO_DATA_FILE)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON-lines script of host callbacks
    Replay {
        /// Script path, or `-` for stdin
        script: PathBuf,

        /// Print snapshots to stdout instead of writing the data file
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the snapshot document for a JSON-serialized job record
    Render {
        /// Record path, or `-` for stdin
        record: PathBuf,
    },

    /// Print the resolved configuration as JSON
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let config = match &cli.data_file {
        Some(path) => JobInfoConfig::new(path),
        None => JobInfoConfig::from_env(),
    };

    match cli.command {
        Commands::Replay { script, dry_run } => run_replay(config, &script, dry_run),
        Commands::Render { record } => run_render(&record),
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn run_replay(config: JobInfoConfig, script: &Path, dry_run: bool) -> Result<()> {
    let input = open_input(script)?;
    let builder = ControllerBuilder::new().config(config);

    let summary = if dry_run {
        let users = SystemUserDirectory;
        let mut controller = builder.build_with_sink(RecordingSink::new());
        replay::run(&mut controller, input, |c| {
            for record in c.sink_mut().take() {
                let user = users.user_name(record.user_id);
                print!("{}", render(&record, user.as_deref()));
                println!();
            }
        })?
    } else {
        let mut controller = builder.build();
        info!(path = %controller.sink().path().display(), "replaying into data file");
        replay::run(&mut controller, input, |_| {})?
    };

    eprintln!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_render(path: &Path) -> Result<()> {
    let input = open_input(path)?;
    let record: JobRecord = serde_json::from_reader(input)
        .with_context(|| format!("decoding job record from {}", path.display()))?;

    let user = SystemUserDirectory.user_name(record.user_id);
    print!("{}", render(&record, user.as_deref()));
    Ok(())
}
