//! Catalogs
//!
//! A catalog is a rule set plus the strategy to price it with, described in
//! YAML:
//!
//! ```yaml
//! strategy: multi_buy
//! rules:
//!   - sku: A
//!     unit_price: 50
//!     special_quantity: 3
//!     special_price: 130
//!   - sku: C
//!     unit_price: 20
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    checkout::Checkout,
    pricing::{
        rules::{PricingRule, RuleSet, RuleSetError},
        strategies::{PricingStrategyKind, StrategyError},
    },
};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown strategy name
    #[error(transparent)]
    Strategy(#[from] StrategyError),

    /// Invalid or duplicate rule
    #[error(transparent)]
    RuleSet(#[from] RuleSetError),
}

/// Catalog file contents
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    /// Strategy name, defaults to multi-buy
    #[serde(default)]
    strategy: Option<String>,

    /// Rule definitions
    rules: Vec<RuleDefinition>,
}

/// A single rule as written in a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDefinition {
    /// SKU
    pub sku: String,

    /// Unit price
    pub unit_price: u64,

    /// Items in the special offer
    #[serde(default)]
    pub special_quantity: Option<u64>,

    /// Price of the special offer
    #[serde(default)]
    pub special_price: Option<u64>,
}

impl TryFrom<RuleDefinition> for PricingRule {
    type Error = RuleSetError;

    fn try_from(definition: RuleDefinition) -> Result<Self, Self::Error> {
        Ok(PricingRule::new(
            definition.sku,
            definition.unit_price,
            definition.special_quantity,
            definition.special_price,
        )?)
    }
}

/// Validated rules and the strategy selected for them.
#[derive(Debug, Clone)]
pub struct Catalog {
    strategy: PricingStrategyKind,
    rules: Arc<RuleSet>,
}

impl Catalog {
    /// Create a catalog from an existing rule set.
    pub fn new(strategy: PricingStrategyKind, rules: impl Into<Arc<RuleSet>>) -> Self {
        Self {
            strategy,
            rules: rules.into(),
        }
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, names an unknown strategy,
    /// or contains an invalid or duplicate rule.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        let strategy = match fixture.strategy.as_deref() {
            Some(name) => name.parse()?,
            None => PricingStrategyKind::default(),
        };

        let rules = fixture
            .rules
            .into_iter()
            .map(PricingRule::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let rules = RuleSet::new(rules)?;

        debug!(%strategy, rules = rules.len(), "loaded catalog");

        Ok(Self::new(strategy, rules))
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Catalog::from_yaml`] fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Load a named catalog from `./fixtures/catalogs/{name}.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, CatalogError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a named catalog from `{base_path}/catalogs/{name}.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, CatalogError> {
        let file_path = base_path
            .into()
            .join("catalogs")
            .join(format!("{name}.yml"));

        Self::load(file_path)
    }

    /// Replace the selected strategy.
    pub fn set_strategy(&mut self, strategy: PricingStrategyKind) {
        self.strategy = strategy;
    }

    /// Return the selected strategy
    pub const fn strategy(&self) -> PricingStrategyKind {
        self.strategy
    }

    /// Return the rule set
    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    /// Open a checkout session over this catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::UnknownStrategyKind`] if the shared factory
    /// cannot supply the selected strategy.
    pub fn checkout(&self) -> Result<Checkout, StrategyError> {
        Checkout::with_strategy(Arc::clone(&self.rules), self.strategy)
    }
}
