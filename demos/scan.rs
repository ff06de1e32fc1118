//! Scan Example
//!
//! Scans the given SKUs against a catalog fixture and prints each line and the total.
//!
//! Use `-f` to load a catalog fixture by name (from `fixtures/catalogs`)
//! Use `-s` to override the catalog's pricing strategy
//!
//! `cargo run --example scan -- -f kata A B A A B D`

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use checkout::{catalog::Catalog, utils::ExampleCheckoutArgs};

/// Scan Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = ExampleCheckoutArgs::parse();

    let mut catalog = Catalog::from_set(&args.fixture)?;

    if let Some(strategy) = args.strategy.as_deref() {
        catalog.set_strategy(strategy.parse()?);
    }

    let mut checkout = catalog.checkout()?;
    checkout.scan_all(args.skus.iter().map(String::as_str))?;

    println!("Strategy: {}", catalog.strategy());

    for line in checkout.line_totals()? {
        println!(
            "{:<10} x{:<4} {:>8} (saved {})",
            line.sku,
            line.quantity,
            line.price,
            line.savings()
        );
    }

    println!("Total: {}", checkout.total_price()?);

    Ok(())
}
