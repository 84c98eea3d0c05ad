mod render;
mod session;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use queuedesk_core::app::{ArrivalSimulator, DeskDriver};
use queuedesk_core::ports::{RandomServiceTime, SystemClock};
use queuedesk_core::queue::{QueueManager, ServiceDesk, SharedDesk};
use queuedesk_core::{ConfigError, DeskConfig};
use thiserror::Error;
use tokio::io::BufReader;

/// Single-counter service queue simulator.
///
/// Examples:
///   queuedesk                         # interactive session with simulated arrivals
///   queuedesk --no-arrivals run       # only the operator adds clients
///   queuedesk --seed 7 demo           # scripted walkthrough
#[derive(Debug, Parser)]
#[command(name = "queuedesk")]
#[command(version)]
#[command(about = "Single-counter service queue simulator")]
struct Cli {
    /// TOML file overriding the default desk configuration.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Seed the random sources for a reproducible run.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Disable the simulated client arrivals.
    #[arg(long, global = true)]
    no_arrivals: bool,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Operate the desk interactively (default).
    Run,

    /// Walk through a two-client scenario and exit.
    Demo,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DeskConfig::default(),
    };
    if cli.no_arrivals {
        config.arrivals.enabled = false;
    }
    config.validate()?;

    let desk: Arc<dyn ServiceDesk> = Arc::new(build_desk(&config, cli.seed)?);

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let arrivals = if config.arrivals.enabled {
                Some(match cli.seed {
                    Some(seed) => {
                        ArrivalSimulator::seeded(&config.arrivals, arrival_seed(seed))?
                    }
                    None => ArrivalSimulator::from_config(&config.arrivals)?,
                })
            } else {
                None
            };
            let driver =
                DeskDriver::spawn(Arc::clone(&desk), config.refresh_interval(), arrivals);
            let stdin = BufReader::new(tokio::io::stdin());
            let result = session::run(desk.as_ref(), stdin, &mut std::io::stdout()).await;
            driver.shutdown_and_join().await;
            result?;
        }
        Command::Demo => session::demo(desk.as_ref(), &mut std::io::stdout()).await?,
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<DeskConfig, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// `--seed` は service time 側にそのまま使い、arrival 側はずらして別系列にする。
fn arrival_seed(seed: u64) -> u64 {
    seed.wrapping_add(1)
}

fn build_desk(config: &DeskConfig, seed: Option<u64>) -> Result<SharedDesk, ConfigError> {
    let service_time = match seed {
        Some(seed) => RandomServiceTime::seeded(&config.service_time, seed)?,
        None => RandomServiceTime::from_config(&config.service_time)?,
    };
    let manager = QueueManager::new(Arc::new(SystemClock), Box::new(service_time));
    Ok(SharedDesk::new(manager))
}
