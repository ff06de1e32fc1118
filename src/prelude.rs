//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError, RuleDefinition},
    checkout::{Checkout, CheckoutError},
    pricing::{
        factory::PricingStrategyFactory,
        rules::{PricingRule, PricingRuleError, RuleSet, RuleSetError, SpecialOffer},
        service::{LineTotal, LineTotals, PricingError, PricingService},
        strategies::{
            BuyOneGetOneFree, MultiBuyPricing, PercentageDiscount, PricingStrategy,
            PricingStrategyKind, StrategyError, UnitPricing,
        },
    },
    tally::ScanTally,
};
