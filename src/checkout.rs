//! Checkout
//!
//! A checkout session accumulates scans and prices them on demand.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::{
    pricing::{
        factory::PricingStrategyFactory,
        rules::RuleSet,
        service::{LineTotals, PricingError, PricingService},
        strategies::{PricingStrategyKind, StrategyError},
    },
    tally::ScanTally,
};

/// Errors raised by a checkout session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The scanned SKU was empty or whitespace.
    #[error("invalid SKU: SKU cannot be null or empty")]
    InvalidSku,

    /// Wrapped pricing error.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// A single checkout session
#[derive(Debug, Clone)]
pub struct Checkout {
    rules: Arc<RuleSet>,
    pricing: PricingService,
    tally: ScanTally,
}

impl Checkout {
    /// Open a session over `rules`, priced by `pricing`.
    pub fn new(rules: impl Into<Arc<RuleSet>>, pricing: PricingService) -> Self {
        Self {
            rules: rules.into(),
            pricing,
            tally: ScanTally::new(),
        }
    }

    /// Open a session using the shared factory's strategy for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::UnknownStrategyKind`] if the factory has no
    /// strategy for `kind`.
    pub fn with_strategy(
        rules: impl Into<Arc<RuleSet>>,
        kind: PricingStrategyKind,
    ) -> Result<Self, StrategyError> {
        let strategy = PricingStrategyFactory::shared().strategy(kind)?;

        Ok(Self::new(rules, PricingService::new(strategy)))
    }

    /// Open a session priced with multi-buy offers.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError::UnknownStrategyKind`] if the factory has no
    /// multi-buy strategy.
    pub fn with_default_strategy(rules: impl Into<Arc<RuleSet>>) -> Result<Self, StrategyError> {
        Self::with_strategy(rules, PricingStrategyKind::default())
    }

    /// Scan one item.
    ///
    /// SKUs without a rule are accepted here and reported by
    /// [`Checkout::total_price`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidSku`] if `sku` is empty or whitespace.
    pub fn scan(&mut self, sku: &str) -> Result<(), CheckoutError> {
        if sku.trim().is_empty() {
            return Err(CheckoutError::InvalidSku);
        }

        let quantity = self.tally.record(sku);

        debug!(sku, quantity, "scanned item");

        Ok(())
    }

    /// Scan several items in order, stopping at the first invalid SKU.
    ///
    /// Items scanned before the invalid one stay scanned.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidSku`] for the first empty or whitespace SKU.
    pub fn scan_all<'s>(
        &mut self,
        skus: impl IntoIterator<Item = &'s str>,
    ) -> Result<(), CheckoutError> {
        skus.into_iter().try_for_each(|sku| self.scan(sku))
    }

    /// Total price of everything scanned so far.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Pricing`] if a scanned SKU has no rule or the
    /// total overflows.
    pub fn total_price(&self) -> Result<u64, CheckoutError> {
        let total = self.pricing.calculate_total(&self.tally, &self.rules)?;

        debug!(total, items = self.tally.item_count(), "calculated total");

        Ok(total)
    }

    /// Per-SKU prices of everything scanned so far, in SKU order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Pricing`] if a scanned SKU has no rule.
    pub fn line_totals(&self) -> Result<LineTotals, CheckoutError> {
        Ok(self.pricing.calculate_lines(&self.tally, &self.rules)?)
    }

    /// Return the scan tally
    pub fn tally(&self) -> &ScanTally {
        &self.tally
    }

    /// Return the rule set
    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::pricing::rules::{PricingRule, RuleSetError};

    use super::*;

    fn kata_rules() -> Result<RuleSet, RuleSetError> {
        RuleSet::new([
            PricingRule::with_offer("A", 50, 3, 130)?,
            PricingRule::with_offer("B", 30, 2, 45)?,
            PricingRule::unit("C", 20)?,
            PricingRule::unit("D", 15)?,
        ])
    }

    #[test]
    fn empty_session_totals_zero() -> TestResult {
        let checkout = Checkout::with_default_strategy(RuleSet::default())?;

        assert_eq!(checkout.total_price()?, 0);

        Ok(())
    }

    #[test]
    fn single_item_costs_unit_price() -> TestResult {
        let mut checkout = Checkout::with_default_strategy(kata_rules()?)?;

        checkout.scan("C")?;

        assert_eq!(checkout.total_price()?, 20);

        Ok(())
    }

    #[test]
    fn total_tracks_each_scan() -> TestResult {
        let mut checkout = Checkout::with_default_strategy(kata_rules()?)?;
        let mut totals = Vec::new();

        for sku in ["A", "B", "A", "B", "A"] {
            checkout.scan(sku)?;
            totals.push(checkout.total_price()?);
        }

        assert_eq!(totals, vec![50, 80, 130, 145, 175]);

        Ok(())
    }

    #[test]
    fn blank_sku_is_rejected_and_not_counted() -> TestResult {
        let mut checkout = Checkout::with_default_strategy(kata_rules()?)?;

        assert_eq!(checkout.scan(""), Err(CheckoutError::InvalidSku));
        assert_eq!(checkout.scan("   "), Err(CheckoutError::InvalidSku));
        assert!(checkout.tally().is_empty());

        Ok(())
    }

    #[test]
    fn unknown_sku_fails_at_total_time() -> TestResult {
        let mut checkout = Checkout::with_default_strategy(kata_rules()?)?;

        checkout.scan("Z")?;

        assert_eq!(
            checkout.total_price(),
            Err(CheckoutError::Pricing(PricingError::UnknownSku {
                sku: "Z".to_string()
            }))
        );

        Ok(())
    }

    #[test]
    fn scan_all_keeps_scans_before_invalid_sku() -> TestResult {
        let mut checkout = Checkout::with_default_strategy(kata_rules()?)?;

        let result = checkout.scan_all(["A", "B", " ", "C"]);

        assert_eq!(result, Err(CheckoutError::InvalidSku));
        assert_eq!(checkout.tally().item_count(), 2);
        assert_eq!(checkout.tally().quantity("C"), 0);

        Ok(())
    }

    #[test]
    fn rules_can_be_shared_between_sessions() -> TestResult {
        let rules = Arc::new(kata_rules()?);

        let mut multi_buy =
            Checkout::with_strategy(Arc::clone(&rules), PricingStrategyKind::MultiBuy)?;
        let mut bogof =
            Checkout::with_strategy(Arc::clone(&rules), PricingStrategyKind::BuyOneGetOneFree)?;

        multi_buy.scan_all(["A", "A", "A"])?;
        bogof.scan_all(["A", "A", "A"])?;

        assert_eq!(multi_buy.total_price()?, 130);
        assert_eq!(bogof.total_price()?, 100);
        assert!(Arc::ptr_eq(multi_buy.rules(), bogof.rules()));

        Ok(())
    }

    #[test]
    fn line_totals_reflect_scans() -> TestResult {
        let mut checkout = Checkout::with_default_strategy(kata_rules()?)?;

        checkout.scan_all(["B", "A", "B"])?;

        let lines = checkout.line_totals()?;
        let prices: Vec<(&str, u64)> = lines
            .iter()
            .map(|line| (line.sku.as_str(), line.price))
            .collect();

        assert_eq!(prices, vec![("A", 50), ("B", 45)]);

        Ok(())
    }
}
