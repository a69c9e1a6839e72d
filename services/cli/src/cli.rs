use crate::commands::{
    run_checkout, run_eligibility, run_whitelist_export, run_whitelist_validate, CheckoutArgs,
    EligibilityArgs, WhitelistExportArgs, WhitelistValidateArgs,
};
use clap::{Parser, Subcommand};
use gym_admission::config::AppConfig;
use gym_admission::error::AppError;
use gym_admission::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "gym-admission",
    about = "Evaluate membership eligibility and checkout guards against admin snapshots",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the capacity badge and display-time verdict for a user
    Eligibility(EligibilityArgs),
    /// Run the checkout guard chain and report the first blocking guard
    Checkout(CheckoutArgs),
    /// Import, dedup, and export lottery lists
    Whitelist {
        #[command(subcommand)]
        command: WhitelistCommand,
    },
}

#[derive(Subcommand, Debug)]
enum WhitelistCommand {
    /// Print the CSV download for a pasted name list
    Export(WhitelistExportArgs),
    /// Check a pasted name list against the allocated slot count
    Validate(WhitelistValidateArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Eligibility(args) => run_eligibility(&config, args),
        Command::Checkout(args) => run_checkout(&config, args),
        Command::Whitelist {
            command: WhitelistCommand::Export(args),
        } => run_whitelist_export(args),
        Command::Whitelist {
            command: WhitelistCommand::Validate(args),
        } => run_whitelist_validate(args),
    }
}
