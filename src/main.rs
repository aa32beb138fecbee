use clap::{Parser, Subcommand, ValueEnum};
use glassbridge::application::engine::GameEngine;
use glassbridge::application::session::GameSession;
use glassbridge::config::{DEFAULT_REVEAL_DELAY, GameConfig};
use glassbridge::domain::ports::RoundLedgerBox;
use glassbridge::infrastructure::in_memory::InMemoryRoundLedger;
use glassbridge::interfaces::console::Console;
use glassbridge::interfaces::csv::action_reader::ActionReader;
use glassbridge::interfaces::csv::event_writer::{EventWriter, SummaryWriter};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine transitions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play interactively on stdin
    Play {
        /// Seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Pause before a pick is revealed, in milliseconds
        #[arg(long, default_value_t = DEFAULT_REVEAL_DELAY.as_millis() as u64)]
        reveal_delay_ms: u64,
    },
    /// Run a CSV script of actions and print one event per action
    Replay {
        /// Action script (`action, value` rows)
        script: PathBuf,

        /// Seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Output format for events
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Also write one CSV row per finished round to this file
        #[arg(long)]
        summary: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Play {
            seed,
            reveal_delay_ms,
        } => {
            let config = GameConfig {
                seed,
                reveal_delay: Duration::from_millis(reveal_delay_ms),
            };
            play(config).await
        }
        Command::Replay {
            script,
            seed,
            format,
            summary,
        } => {
            let config = GameConfig {
                seed,
                ..Default::default()
            };
            replay(config, script, format, summary).await
        }
    }
}

async fn play(config: GameConfig) -> Result<()> {
    let ledger: RoundLedgerBox = Box::new(InMemoryRoundLedger::new());
    let session = GameSession::new(GameEngine::with_random(config.random_source()), ledger);

    let input = BufReader::new(tokio::io::stdin());
    Console::new(session, input, io::stdout(), config.reveal_delay)
        .run()
        .await
        .into_diagnostic()?;
    Ok(())
}

async fn replay(
    config: GameConfig,
    script: PathBuf,
    format: OutputFormat,
    summary: Option<PathBuf>,
) -> Result<()> {
    let ledger: RoundLedgerBox = Box::new(InMemoryRoundLedger::new());
    let mut session = GameSession::new(GameEngine::with_random(config.random_source()), ledger);

    let file = File::open(script).into_diagnostic()?;
    let reader = ActionReader::new(file);

    let stdout = io::stdout();
    let mut csv_writer = match format {
        OutputFormat::Csv => Some(EventWriter::new(stdout.lock())),
        OutputFormat::Json => None,
    };

    for action_result in reader.actions() {
        match action_result {
            Ok(action) => match session.apply(action).await {
                Ok(event) => match csv_writer.as_mut() {
                    Some(writer) => writer.write_event(&event).into_diagnostic()?,
                    None => {
                        let line = serde_json::to_string(&event).into_diagnostic()?;
                        writeln!(io::stdout(), "{line}").into_diagnostic()?;
                    }
                },
                Err(e) => eprintln!("Error applying action: {}", e),
            },
            Err(e) => {
                eprintln!("Error reading action: {}", e);
            }
        }
    }

    if let Some(writer) = csv_writer.as_mut() {
        writer.flush().into_diagnostic()?;
    }

    let report = session.report().await.into_diagnostic()?;
    eprintln!(
        "Session summary: rounds={} wins={} losses={} wagered={} paid_out={} net={}",
        report.rounds, report.wins, report.losses, report.wagered, report.paid_out, report.net
    );

    if let Some(path) = summary {
        let rounds = session.into_summaries().await.into_diagnostic()?;
        let file = File::create(path).into_diagnostic()?;
        SummaryWriter::new(file)
            .write_rounds(&rounds)
            .into_diagnostic()?;
    }
    Ok(())
}
