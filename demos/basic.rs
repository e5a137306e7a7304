//! Basic example demonstrating the Snipe-IT report library.
//!
//! Run with:
//! ```
//! SNIPE_API_KEY_FILE=./api_key.txt cargo run --example basic
//! ```

use snipe_report::{
    classify_asset_tag, render_table, Cohort, Config, Inventory, Reporter, SnipeClient,
};

#[tokio::main]
async fn main() -> snipe_report::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let mut config = Config::default();
    if let Ok(path) = std::env::var("SNIPE_API_KEY_FILE") {
        config.api_key_file = path.into();
    }

    println!("Creating Snipe-IT client...");
    let client = SnipeClient::from_config(&config)?;
    println!("Connected to: {}", client.api_url());

    let reporter = Reporter::new(Inventory::from_transport(client));

    // Fleet overview
    println!("\n--- Fleet ---");
    for cohort in [Cohort::Active, Cohort::Staff, Cohort::Spares, Cohort::Archived] {
        let laptops = reporter.inventory().laptops(cohort).await?;
        println!("  {cohort}: {} laptops", laptops.len());
    }

    // Tag generations of the spares
    println!("\n--- Spare Laptops ---");
    let spares = reporter.inventory().laptops(Cohort::Spares).await?;
    for laptop in spares.iter().take(5) {
        let tag = laptop["asset_tag"].as_str().unwrap_or("?");
        println!("  - {tag} ({})", classify_asset_tag(tag));
    }

    // A full report, rendered the way the CLI does
    println!("\n--- Oldest Laptops ---");
    let report = reporter.laptops_by_age(Cohort::Staff, 4.0).await?;
    println!("{}", render_table(&report));

    let lonely = reporter.users_with_no_assets().await?;
    println!("\n{} users have no laptop", lonely.len());

    println!("\nDone!");
    Ok(())
}
