pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

pub use crate::cli::favorites::FavoritesCommand;

use crate::core::config::AppConfig;
use crate::core::{HistoricalPeriod, MockHistoryGenerator, RateProvider, SessionState};
use crate::store::{DiskStorage, KeyValueStorage};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Rates {
        base: Option<String>,
        all: bool,
    },
    Favorites(FavoritesCommand),
    History {
        limit: usize,
    },
    Historical {
        from: String,
        to: String,
        period: HistoricalPeriod,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxdash starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let data_path = config.default_data_path()?;
    let storage: Arc<dyn KeyValueStorage> = Arc::new(DiskStorage::open(&data_path)?);
    let mut state = SessionState::load(storage);

    let provider: Arc<dyn RateProvider> = Arc::new(
        providers::ExchangeRateApiProvider::new(config.exchangerate_url()),
    );

    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&amount, &from, &to, provider, &mut state).await
        }
        AppCommand::Rates { base, all } => {
            let base = base.unwrap_or_else(|| config.base_currency.clone());
            cli::rates::run(&base, all, provider.as_ref(), &state).await
        }
        AppCommand::Favorites(cmd) => {
            cli::favorites::run(cmd, &config.base_currency, provider.as_ref(), &mut state).await
        }
        AppCommand::History { limit } => cli::history::run(limit, &state),
        AppCommand::Historical { from, to, period } => {
            let history_provider = MockHistoryGenerator::new();
            cli::historical::run(&from, &to, period, &history_provider).await
        }
    }
}
