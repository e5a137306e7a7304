//! CLI argument parsing and command dispatch.
//!
//! Every report is a subcommand; the clap derive below is the registry of
//! available commands and their typed parameters.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use serde_json::Value;

use crate::config::{Config, DEFAULT_API_KEY_FILE, DEFAULT_BASE_URL};
use crate::error::Result;
use crate::models::{Cohort, Os};
use crate::output::Printer;
use crate::query::TrailingPageFailure;
use crate::report::{Report, Reporter};
use crate::traits::Transport;

/// Snipe-IT inventory reports.
#[derive(Parser, Debug)]
#[command(name = "snipe-report", about = "Snipe-IT inventory reports", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Snipe-IT web root, used for asset links.
    #[arg(long, global = true, env = "SNIPE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// REST API root (defaults to `<base-url>api/v1/`).
    #[arg(long, global = true, env = "SNIPE_API_URL")]
    pub api_url: Option<String>,

    /// File containing the Snipe-IT API key.
    #[arg(long, global = true, env = "SNIPE_API_KEY_FILE", default_value = DEFAULT_API_KEY_FILE)]
    pub api_key_file: PathBuf,

    /// Fail when a later page of a listing fails instead of keeping the
    /// rows fetched so far.
    #[arg(long, global = true, default_value = "false")]
    pub strict_pagination: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Connection settings from the parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL argument is invalid.
    pub fn config(&self) -> Result<Config> {
        Config::new(&self.base_url, self.api_url.as_deref(), self.api_key_file.clone())
    }

    pub fn trailing_page_failure(&self) -> TrailingPageFailure {
        if self.strict_pagination {
            TrailingPageFailure::Fail
        } else {
            TrailingPageFailure::Truncate
        }
    }
}

/// Available reports.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Laptops in a fleet, by asset tag.
    Laptops {
        /// Fleet to report on ('active' is all staff and spares, without archived).
        #[arg(value_enum, default_value_t = Cohort::Active)]
        fleet: Cohort,
    },

    /// Laptops that are still under warranty.
    LaptopsInWarranty {
        /// Fleet to report on.
        #[arg(value_enum, default_value_t = Cohort::Active)]
        fleet: Cohort,
    },

    /// Laptops with their purchase date and approximate age.
    LaptopsByAge {
        /// Fleet to report on.
        #[arg(value_enum, default_value_t = Cohort::Active)]
        fleet: Cohort,

        /// Only show date-tagged laptops at least this many years old.
        #[arg(long, default_value_t = 0.0)]
        older_than: f64,
    },

    /// Laptops by status label.
    LaptopsByStatus {
        /// Fleet to report on.
        #[arg(value_enum, default_value_t = Cohort::Active)]
        fleet: Cohort,

        /// A status type (pending, archived, deployable) or a status name.
        /// Run `statuses` to list the options.
        #[arg(long)]
        status: Option<String>,
    },

    /// Laptops grouped by manufacturer.
    LaptopsByManufacturer {
        /// Fleet to report on.
        #[arg(value_enum, default_value_t = Cohort::Active)]
        fleet: Cohort,
    },

    /// Estimated resale price of one laptop.
    LaptopSalePrice {
        /// Asset tag of the laptop.
        asset_tag: String,
    },

    /// All attributes of one laptop.
    LaptopInfo {
        /// Asset tag of the laptop.
        asset_tag: String,
    },

    /// Laptop models.
    LaptopModels,

    /// All status labels.
    Statuses,

    /// All asset models.
    Models,

    /// All manufacturers.
    Manufacturers,

    /// Users and the laptops assigned to them.
    Users,

    /// Users whose assigned laptop runs the given OS.
    UsersByOs {
        /// Fleet to report on.
        #[arg(value_enum)]
        fleet: Cohort,

        /// Operating system family.
        #[arg(value_enum)]
        os: Os,
    },

    /// Users without a laptop.
    UsersWithNoAssets,

    /// Users with more than one laptop.
    UsersWithMultipleAssets,

    /// List available reports.
    Commands,
}

/// Heading under which a command is listed by `commands`.
pub fn command_group(name: &str) -> &'static str {
    if name.starts_with("users") {
        "Users"
    } else if name.starts_with("laptop") {
        "Laptops"
    } else {
        "Other"
    }
}

/// The report registry as a table of group, command and description.
pub fn command_registry() -> Report {
    let cli = Cli::command();
    let mut rows: Vec<(usize, Vec<Value>)> = cli
        .get_subcommands()
        .filter(|sub| sub.get_name() != "commands")
        .map(|sub| {
            let name = sub.get_name();
            let group = command_group(name);
            let rank = ["Users", "Laptops", "Other"]
                .iter()
                .position(|g| *g == group)
                .unwrap_or(usize::MAX);
            let about = sub.get_about().map(|a| a.to_string()).unwrap_or_default();
            (rank, vec![Value::from(group), Value::from(name), Value::from(about)])
        })
        .collect();

    // stable: declaration order within each group
    rows.sort_by_key(|(rank, _)| *rank);

    Report::new(
        &["Group", "Command", "Description"],
        rows.into_iter().map(|(_, row)| row).collect(),
    )
}

/// Run one report command and send its output to `printer`.
///
/// # Errors
///
/// Returns the first fetch or output error.
pub async fn run<T, P>(reporter: &Reporter<T>, command: &Command, printer: &mut P) -> Result<()>
where
    T: Transport,
    P: Printer,
{
    match command {
        Command::Laptops { fleet } => printer.print_report(&reporter.laptops(*fleet).await?),
        Command::LaptopsInWarranty { fleet } => {
            printer.print_report(&reporter.laptops_in_warranty(*fleet).await?)
        }
        Command::LaptopsByAge { fleet, older_than } => {
            printer.print_report(&reporter.laptops_by_age(*fleet, *older_than).await?)
        }
        Command::LaptopsByStatus { fleet, status } => printer.print_report(
            &reporter
                .laptops_by_status(*fleet, status.as_deref())
                .await?,
        ),
        Command::LaptopsByManufacturer { fleet } => {
            printer.print_reports(&reporter.laptops_by_manufacturer(*fleet).await?)
        }
        Command::LaptopSalePrice { asset_tag } => {
            printer.print_report(&reporter.laptop_sale_price(asset_tag).await?)
        }
        Command::LaptopInfo { asset_tag } => {
            let info = reporter.laptop_info(asset_tag).await?;
            printer.print_report(&info.report)?;
            if let Some(id) = info.asset_id {
                printer.print_asset_url(&id)?;
            }
            Ok(())
        }
        Command::LaptopModels => printer.print_report(&reporter.laptop_models().await?),
        Command::Statuses => printer.print_report(&reporter.statuses().await?),
        Command::Models => printer.print_report(&reporter.models().await?),
        Command::Manufacturers => printer.print_report(&reporter.manufacturers().await?),
        Command::Users => printer.print_report(&reporter.users().await?),
        Command::UsersByOs { fleet, os } => {
            printer.print_report(&reporter.users_by_os(*fleet, *os).await?)
        }
        Command::UsersWithNoAssets => printer.print_report(&reporter.users_with_no_assets().await?),
        Command::UsersWithMultipleAssets => {
            printer.print_report(&reporter.users_with_multiple_assets().await?)
        }
        Command::Commands => printer.print_report(&command_registry()),
    }
}
