use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use fundvs::cli::compare::CompareRequest;
use fundvs::cli::ui;
use fundvs::core::log::init_logging;
use std::process::ExitCode;

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
    /// Compare a fund purchase against USD, EUR and gold
    Compare {
        /// Fund name shown in the table
        #[arg(long)]
        fund_name: Option<String>,
        /// Purchase date (YYYY-MM-DD), not after today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Purchase price per unit (TRY)
        #[arg(long)]
        unit_price: Option<f64>,
        /// Number of units bought
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: Option<u32>,
        /// Current price per unit (TRY)
        #[arg(long)]
        current_price: Option<f64>,
    },
    /// Show TRY rates for USD, EUR and gold
    Rates {
        /// Historical date (YYYY-MM-DD); live rates when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

impl From<Commands> for fundvs::AppCommand {
    fn from(cmd: Commands) -> fundvs::AppCommand {
        match cmd {
            Commands::Compare {
                fund_name,
                date,
                unit_price,
                quantity,
                current_price,
            } => fundvs::AppCommand::Compare(CompareRequest {
                fund_name,
                purchase_date: date,
                unit_price,
                quantity,
                current_price,
            }),
            Commands::Rates { date } => fundvs::AppCommand::Rates { date },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fundvs::cli::setup::setup(),
        Some(cmd) => fundvs::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => Cli::command().print_help().map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            eprintln!(
                "{}",
                ui::style_text(&ui::describe_error(&e), ui::StyleType::Error)
            );
            ExitCode::FAILURE
        }
    }
}
