//! Snipe-IT reports CLI binary.
//!
//! A command-line interface for inventory reports over the Snipe-IT API.

use clap::Parser;
use snipe_report::cli::{command_registry, run, Cli, Command};
use snipe_report::{Inventory, Printer, QueryAggregator, Reporter, SnipeClient, TablePrinter};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let config = match cli.config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut printer = TablePrinter::stdout(config.base_url.clone(), cli.json);

    // Listing commands needs no credentials
    if cli.command == Command::Commands {
        return exit_code(printer.print_report(&command_registry()));
    }

    let client = match SnipeClient::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Hint: Put your Snipe-IT API key in {} or set SNIPE_API_KEY_FILE",
                config.api_key_file.display()
            );
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(api_url = %client.api_url(), "starting report");

    let aggregator =
        QueryAggregator::new(client).with_trailing_page_failure(cli.trailing_page_failure());
    let reporter = Reporter::new(Inventory::new(aggregator));

    exit_code(run(&reporter, &cli.command, &mut printer).await)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(result: snipe_report::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
