//! Pricing Service
//!
//! Prices a [`ScanTally`] against a [`RuleSet`] using a single strategy.

use std::sync::Arc;

use smallvec::SmallVec;
use thiserror::Error;
use tracing::trace;

use crate::{
    pricing::{rules::RuleSet, strategies::PricingStrategy},
    tally::ScanTally,
};

/// Errors raised while totalling a tally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// A scanned SKU has no pricing rule.
    #[error("Unknown SKU '{sku}'. This item does not exist in the pricing rules.")]
    UnknownSku {
        /// The SKU that was scanned
        sku: String,
    },

    /// A single line's price does not fit in a `u64`.
    #[error("line price overflowed for SKU '{sku}'")]
    LineOverflow {
        /// SKU whose line overflowed
        sku: String,
    },

    /// The running total no longer fits in a `u64`.
    #[error("total price overflowed while adding SKU '{sku}'")]
    TotalOverflow {
        /// SKU whose line pushed the total over
        sku: String,
    },
}

/// Price of every scanned item of one SKU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTotal {
    /// SKU
    pub sku: String,

    /// Number of items scanned
    pub quantity: u64,

    /// Rule unit price
    pub unit_price: u64,

    /// Line price after the strategy has been applied
    pub price: u64,
}

impl LineTotal {
    /// Amount saved against paying unit price for every item.
    pub fn savings(&self) -> u64 {
        self.quantity
            .saturating_mul(self.unit_price)
            .saturating_sub(self.price)
    }
}

/// Per-SKU breakdown of a tally, in SKU order
pub type LineTotals = SmallVec<[LineTotal; 10]>;

/// Totals scanned items with a fixed pricing strategy.
#[derive(Debug, Clone)]
pub struct PricingService {
    strategy: Arc<dyn PricingStrategy>,
}

impl PricingService {
    /// Create a service that prices every line with `strategy`.
    pub fn new(strategy: Arc<dyn PricingStrategy>) -> Self {
        Self { strategy }
    }

    /// Return the strategy
    pub fn strategy(&self) -> &Arc<dyn PricingStrategy> {
        &self.strategy
    }

    /// Price each scanned SKU.
    ///
    /// Lines are produced in SKU order, so the first unknown SKU reported is
    /// always the same for a given tally.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownSku`] if a scanned SKU has no rule, or
    /// [`PricingError::LineOverflow`] if a line's price does not fit in a `u64`.
    pub fn calculate_lines(
        &self,
        tally: &ScanTally,
        rules: &RuleSet,
    ) -> Result<LineTotals, PricingError> {
        let mut scanned: SmallVec<[(&str, u64); 10]> = tally.iter().collect();
        scanned.sort_unstable_by_key(|(sku, _)| *sku);

        scanned
            .into_iter()
            .map(|(sku, quantity)| {
                let rule = rules.get(sku).ok_or_else(|| PricingError::UnknownSku {
                    sku: sku.to_string(),
                })?;

                let price = self
                    .strategy
                    .calculate_price(
                        quantity,
                        rule.unit_price(),
                        rule.special_quantity(),
                        rule.special_price(),
                    )
                    .ok_or_else(|| PricingError::LineOverflow {
                        sku: sku.to_string(),
                    })?;

                trace!(sku, quantity, price, "priced line");

                Ok(LineTotal {
                    sku: sku.to_string(),
                    quantity,
                    unit_price: rule.unit_price(),
                    price,
                })
            })
            .collect()
    }

    /// Total price of every scanned item.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownSku`] if a scanned SKU has no rule,
    /// [`PricingError::LineOverflow`] if a single line does not fit in a `u64`,
    /// or [`PricingError::TotalOverflow`] if the sum does not fit.
    #[tracing::instrument(level = "debug", skip_all, fields(skus = tally.len()))]
    pub fn calculate_total(&self, tally: &ScanTally, rules: &RuleSet) -> Result<u64, PricingError> {
        self.calculate_lines(tally, rules)?
            .into_iter()
            .try_fold(0_u64, |total, line| {
                total
                    .checked_add(line.price)
                    .ok_or(PricingError::TotalOverflow { sku: line.sku })
            })
    }
}
