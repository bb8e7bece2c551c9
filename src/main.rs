use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxdash::core::HistoricalPeriod;
use fxdash::core::log::init_logging;
use fxdash::{AppCommand, FavoritesCommand};

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

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert; unparseable input counts as 0
        amount: String,
        /// Currency to convert from
        from: String,
        /// Currency to convert to
        to: String,
    },
    /// Display quick rates for favorite currencies
    Rates {
        /// Base currency (defaults to the configured one)
        #[arg(short, long)]
        base: Option<String>,
        /// Show every known currency instead of favorites
        #[arg(short, long)]
        all: bool,
    },
    /// Manage favorite currencies
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },
    /// Display recent conversions
    History {
        /// Number of conversions to show
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
    /// Display simulated historical rates for a currency pair
    Historical {
        from: String,
        to: String,
        /// One of 7D, 30D, 3M, 1Y
        #[arg(short, long, default_value = "7D")]
        period: HistoricalPeriod,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites with their current rates
    List,
    /// Add a currency to favorites
    Add { code: String },
    /// Remove a currency from favorites
    Remove { code: String },
}

impl From<Commands> for AppCommand {
    fn from(cmd: Commands) -> AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => AppCommand::Convert {
                amount,
                from: from.to_uppercase(),
                to: to.to_uppercase(),
            },
            Commands::Rates { base, all } => AppCommand::Rates {
                base: base.map(|b| b.to_uppercase()),
                all,
            },
            Commands::Favorites { action } => AppCommand::Favorites(match action {
                None | Some(FavoritesAction::List) => FavoritesCommand::List,
                Some(FavoritesAction::Add { code }) => FavoritesCommand::Add(code.to_uppercase()),
                Some(FavoritesAction::Remove { code }) => {
                    FavoritesCommand::Remove(code.to_uppercase())
                }
            }),
            Commands::History { limit } => AppCommand::History { limit },
            Commands::Historical { from, to, period } => AppCommand::Historical {
                from: from.to_uppercase(),
                to: to.to_uppercase(),
                period,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxdash::cli::setup::setup(),
        Some(cmd) => fxdash::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
