//! gomon - restart a Go program whenever its sources change

use anyhow::{Context, Result};
use clap::Parser;
use cli_lib::{operator, signals, ControlPlane, Inputs};
use gomon_core::RunSpec;
use std::io::BufReader;
use std::path::PathBuf;
use supervisor::{CommandLauncher, Supervisor};
use tokio::sync::mpsc;
use tracing::{info, Level};
use watcher::{IgnoreRules, NotifySource};

/// gomon - watch a Go program and restart it when a file changes
///
/// Type `rst` and press enter to restart manually.
#[derive(Parser)]
#[command(name = "gomon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug output
    #[arg(short, long)]
    verbose: bool,

    /// Go file or project directory (default: .), then arguments for the
    /// program. Everything after the path is forwarded untouched.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    argv: Vec<String>,
}

impl Cli {
    /// Split the positional words into the watch path and forwarded args
    fn into_target(self) -> (PathBuf, Vec<String>) {
        let mut argv = self.argv.into_iter();
        let path = argv.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
        (path, argv.collect())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let (path, args) = cli.into_target();
    let (spec, config) = RunSpec::resolve(&path, args)?;
    let rules = IgnoreRules::from_config(&config);

    let (mut source, stream) = NotifySource::new()?;
    let watch_set = watcher::register(spec.target(), &rules, &mut source)
        .context("Failed to register watched files")?;
    info!("watching {} file(s)", watch_set.len());

    let (shutdown_tx, shutdown) = mpsc::channel(4);
    signals::spawn_listener(shutdown_tx).context("Failed to install signal handlers")?;

    let (manual_tx, manual) = mpsc::channel(16);
    operator::spawn_reader(BufReader::new(std::io::stdin()), manual_tx)
        .context("Failed to start operator input reader")?;

    let plane = ControlPlane::new(source, Supervisor::new(CommandLauncher::new()), spec);
    plane
        .run(Inputs {
            stream,
            manual,
            shutdown,
        })
        .await?;

    Ok(())
}
