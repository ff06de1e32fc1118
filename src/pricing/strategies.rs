//! Pricing Strategies
//!
//! A strategy turns a scanned quantity and a rule's prices into a line total.
//! Strategies hold no state, so one instance can price every line of every
//! session.

use std::{fmt, str::FromStr};

use thiserror::Error;

pub mod buy_one_get_one_free;
pub mod multi_buy;
pub mod percentage_discount;
pub mod unit;

pub use self::{
    buy_one_get_one_free::BuyOneGetOneFree, multi_buy::MultiBuyPricing,
    percentage_discount::PercentageDiscount, unit::UnitPricing,
};

/// Strategy selection errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StrategyError {
    /// The selector did not name a known strategy.
    #[error("Unknown strategy type: {0}")]
    UnknownStrategyKind(String),
}

/// Computes the price of a line of identical items.
pub trait PricingStrategy: fmt::Debug + Send + Sync {
    /// Price `quantity` items of a SKU.
    ///
    /// `special_quantity` and `special_price` come straight from the SKU's
    /// pricing rule; each strategy decides how (or whether) to use them.
    /// Returns `None` if the line price does not fit in a `u64`.
    fn calculate_price(
        &self,
        quantity: u64,
        unit_price: u64,
        special_quantity: Option<u64>,
        special_price: Option<u64>,
    ) -> Option<u64>;
}

/// Strategies that can be selected for a checkout session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PricingStrategyKind {
    /// "N for X" offers, with leftover items at unit price.
    #[default]
    MultiBuy,

    /// Every second item is free.
    BuyOneGetOneFree,

    /// Percentage off the line once a quantity threshold is met.
    PercentageDiscount,
}

impl PricingStrategyKind {
    /// Every selectable kind, in code order.
    pub const ALL: [Self; 3] = [
        Self::MultiBuy,
        Self::BuyOneGetOneFree,
        Self::PercentageDiscount,
    ];

    /// Canonical snake case name
    pub const fn name(self) -> &'static str {
        match self {
            Self::MultiBuy => "multi_buy",
            Self::BuyOneGetOneFree => "buy_one_get_one_free",
            Self::PercentageDiscount => "percentage_discount",
        }
    }
}

impl fmt::Display for PricingStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PricingStrategyKind {
    type Err = StrategyError;

    /// Parse a strategy name, ignoring case, `_`, `-` and spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalised.as_str() {
            "multibuy" => Ok(Self::MultiBuy),
            "buyonegetonefree" | "bogof" => Ok(Self::BuyOneGetOneFree),
            "percentagediscount" | "percentage" => Ok(Self::PercentageDiscount),
            _ => Err(StrategyError::UnknownStrategyKind(s.to_string())),
        }
    }
}

impl TryFrom<u8> for PricingStrategyKind {
    type Error = StrategyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::MultiBuy),
            1 => Ok(Self::BuyOneGetOneFree),
            2 => Ok(Self::PercentageDiscount),
            other => Err(StrategyError::UnknownStrategyKind(other.to_string())),
        }
    }
}
