use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxview::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxview::AppCommand {
    fn from(cmd: Commands) -> fxview::AppCommand {
        match cmd {
            Commands::Snapshot => fxview::AppCommand::Snapshot,
            Commands::Live => fxview::AppCommand::Live,
            Commands::History { base, days, json } => {
                fxview::AppCommand::History { base, days, json }
            }
            Commands::Zodiac { year } => fxview::AppCommand::Zodiac { year },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display the locally stored rate snapshot
    Snapshot,
    /// Display live rates for the configured base currency
    Live,
    /// Display recent daily rates for a base currency
    History {
        /// Base currency code, e.g. USD
        #[arg(short, long)]
        base: Option<String>,
        /// Number of days to fetch, overrides the configured window
        #[arg(short, long)]
        days: Option<usize>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Display the zodiac animal for a year
    Zodiac {
        #[arg(allow_negative_numbers = true)]
        year: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxview::cli::setup::setup(),
        Some(cmd) => fxview::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
