//! Utils

use clap::Parser;

/// Arguments for the checkout example
#[derive(Debug, Parser)]
pub struct ExampleCheckoutArgs {
    /// Catalog fixture to price the scans with
    #[clap(short, long, default_value = "kata")]
    pub fixture: String,

    /// Strategy to use instead of the catalog's own
    #[clap(short, long)]
    pub strategy: Option<String>,

    /// SKUs to scan, in order
    pub skus: Vec<String>,
}
