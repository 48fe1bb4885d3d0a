pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::compare::CompareRequest;
use crate::core::config::AppConfig;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

pub enum AppCommand {
    /// Compare a fund purchase against USD, EUR and gold.
    Compare(CompareRequest),
    /// Show the rate set for a date, or live rates.
    Rates { date: Option<NaiveDate> },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fundvs starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::exchangerate_host::ExchangeRateHostProvider::new(
        config.exchangerate_base_url(),
        config.access_key(),
    )?;

    match command {
        AppCommand::Compare(request) => {
            let investment = request.resolve(&config.fund, Local::now().date_naive())?;
            cli::compare::run(&investment, &provider).await
        }
        AppCommand::Rates { date } => cli::rates::run(&provider, date).await,
    }
}
