//! Strategy Factory
//!
//! Hands out one shared instance per [`PricingStrategyKind`]. The cache is
//! filled when the factory is built and never written again, so lookups are
//! safe from any number of threads.

use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;

use crate::pricing::strategies::{
    BuyOneGetOneFree, MultiBuyPricing, PercentageDiscount, PricingStrategy, PricingStrategyKind,
    StrategyError,
};

static SHARED: OnceLock<PricingStrategyFactory> = OnceLock::new();

/// Cache of pricing strategies keyed by kind
#[derive(Debug)]
pub struct PricingStrategyFactory {
    strategies: FxHashMap<PricingStrategyKind, Arc<dyn PricingStrategy>>,
}

impl PricingStrategyFactory {
    /// Build a factory with one instance of every strategy kind.
    pub fn new() -> Self {
        let strategies = PricingStrategyKind::ALL
            .into_iter()
            .map(|kind| {
                let strategy: Arc<dyn PricingStrategy> = match kind {
                    PricingStrategyKind::MultiBuy => Arc::new(MultiBuyPricing),
                    PricingStrategyKind::BuyOneGetOneFree => Arc::new(BuyOneGetOneFree),
                    PricingStrategyKind::PercentageDiscount => Arc::new(PercentageDiscount),
                };

                (kind, strategy)
            })
            .collect();

        Self { strategies }
    }

    /// Process-wide factory, built on first use.
    pub fn shared() -> &'static Self {
        SHARED.get_or_init(Self::new)
    }

    /// Return the cached strategy for `kind`.
    ///
    /// Repeated calls with the same kind return the same instance, comparable
    /// with [`Arc::ptr_eq`].
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::UnknownStrategyKind`] if the cache holds no
    /// strategy for `kind`.
    pub fn strategy(
        &self,
        kind: PricingStrategyKind,
    ) -> Result<Arc<dyn PricingStrategy>, StrategyError> {
        self.strategies
            .get(&kind)
            .cloned()
            .ok_or_else(|| StrategyError::UnknownStrategyKind(kind.to_string()))
    }

    /// Parse a strategy name and return its cached strategy.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::UnknownStrategyKind`] if `name` is not a known
    /// strategy.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn PricingStrategy>, StrategyError> {
        self.strategy(name.parse()?)
    }

    /// Number of cached strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for PricingStrategyFactory {
    fn default() -> Self {
        Self::new()
    }
}
