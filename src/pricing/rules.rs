//! Pricing Rules
//!
//! A [`PricingRule`] carries the unit price of a single SKU and an optional
//! special offer. Rules validate themselves on construction, so a rule that
//! exists is always well formed. A [`RuleSet`] indexes rules by SKU for the
//! lifetime of a checkout session.

use rustc_hash::{FxBuildHasher, FxHashMap};
use thiserror::Error;

/// Errors raised when a pricing rule violates one of its invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingRuleError {
    /// The SKU was empty or contained only whitespace.
    #[error("invalid pricing rule: SKU cannot be null or empty")]
    EmptySku,

    /// The unit price was zero.
    #[error("invalid pricing rule for '{sku}': Unit price must be greater than zero")]
    ZeroUnitPrice {
        /// Offending SKU
        sku: String,
    },

    /// Only one half of the special offer was supplied.
    #[error(
        "invalid pricing rule for '{sku}': Special quantity and special price must both be provided"
    )]
    IncompleteSpecialOffer {
        /// Offending SKU
        sku: String,
    },

    /// The special offer quantity was zero.
    #[error("invalid pricing rule for '{sku}': Special quantity must be greater than zero")]
    ZeroSpecialQuantity {
        /// Offending SKU
        sku: String,
    },

    /// The special offer price was zero.
    #[error("invalid pricing rule for '{sku}': Special price must be greater than zero")]
    ZeroSpecialPrice {
        /// Offending SKU
        sku: String,
    },

    /// The special offer costs the same as, or more than, buying at unit price.
    #[error(
        "invalid pricing rule for '{sku}': Special price {special_price} must be less than regular price {regular_price} for {special_quantity} items"
    )]
    NotADiscount {
        /// Offending SKU
        sku: String,
        /// Offer price for the bundle
        special_price: u64,
        /// Number of items in the bundle
        special_quantity: u64,
        /// What the bundle costs at unit price
        regular_price: u64,
    },
}

/// A "buy `quantity` for `price`" offer attached to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialOffer {
    quantity: u64,
    price: u64,
}

impl SpecialOffer {
    /// Number of items the offer applies to.
    pub const fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Price charged for `quantity` items.
    pub const fn price(&self) -> u64 {
        self.price
    }
}

/// Price of a single SKU, with an optional special offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingRule {
    sku: String,
    unit_price: u64,
    special_offer: Option<SpecialOffer>,
}

impl PricingRule {
    /// Create a validated pricing rule.
    ///
    /// Checks run in a fixed order so the reported error is deterministic:
    /// SKU, unit price, offer completeness, offer quantity, offer price, and
    /// finally that the offer is cheaper than buying at unit price.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingRuleError`] naming the first violated constraint.
    pub fn new(
        sku: impl Into<String>,
        unit_price: u64,
        special_quantity: Option<u64>,
        special_price: Option<u64>,
    ) -> Result<Self, PricingRuleError> {
        let sku = sku.into();

        if sku.trim().is_empty() {
            return Err(PricingRuleError::EmptySku);
        }

        if unit_price == 0 {
            return Err(PricingRuleError::ZeroUnitPrice { sku });
        }

        let special_offer = match (special_quantity, special_price) {
            (None, None) => None,
            (Some(quantity), Some(price)) => {
                Some(validate_offer(&sku, unit_price, quantity, price)?)
            }
            _ => return Err(PricingRuleError::IncompleteSpecialOffer { sku }),
        };

        Ok(Self {
            sku,
            unit_price,
            special_offer,
        })
    }

    /// Create a rule with no special offer.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingRuleError`] if the SKU is blank or the price is zero.
    pub fn unit(sku: impl Into<String>, unit_price: u64) -> Result<Self, PricingRuleError> {
        Self::new(sku, unit_price, None, None)
    }

    /// Create a rule with a "`quantity` for `special_price`" offer.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingRuleError`] if any invariant is violated.
    pub fn with_offer(
        sku: impl Into<String>,
        unit_price: u64,
        quantity: u64,
        special_price: u64,
    ) -> Result<Self, PricingRuleError> {
        Self::new(sku, unit_price, Some(quantity), Some(special_price))
    }

    /// Return the SKU
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Return the unit price
    pub const fn unit_price(&self) -> u64 {
        self.unit_price
    }

    /// Return the special offer, if any
    pub const fn special_offer(&self) -> Option<SpecialOffer> {
        self.special_offer
    }

    /// Return the special offer quantity, if any
    pub fn special_quantity(&self) -> Option<u64> {
        self.special_offer.map(|offer| offer.quantity)
    }

    /// Return the special offer price, if any
    pub fn special_price(&self) -> Option<u64> {
        self.special_offer.map(|offer| offer.price)
    }
}

fn validate_offer(
    sku: &str,
    unit_price: u64,
    quantity: u64,
    price: u64,
) -> Result<SpecialOffer, PricingRuleError> {
    if quantity == 0 {
        return Err(PricingRuleError::ZeroSpecialQuantity {
            sku: sku.to_string(),
        });
    }

    if price == 0 {
        return Err(PricingRuleError::ZeroSpecialPrice {
            sku: sku.to_string(),
        });
    }

    // A regular price past u64::MAX is always above any special price.
    if let Some(regular_price) = unit_price.checked_mul(quantity)
        && price >= regular_price
    {
        return Err(PricingRuleError::NotADiscount {
            sku: sku.to_string(),
            special_price: price,
            special_quantity: quantity,
            regular_price,
        });
    }

    Ok(SpecialOffer { quantity, price })
}

/// Errors raised while assembling a [`RuleSet`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleSetError {
    /// A rule definition failed validation.
    #[error(transparent)]
    InvalidRule(#[from] PricingRuleError),

    /// Two rules were supplied for the same SKU.
    #[error("duplicate pricing rule for SKU '{sku}'")]
    DuplicateSku {
        /// Repeated SKU
        sku: String,
    },
}

/// Pricing rules indexed by SKU.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: FxHashMap<String, PricingRule>,
}

impl RuleSet {
    /// Index a collection of validated rules by SKU.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::DuplicateSku`] if two rules share a SKU.
    pub fn new(rules: impl IntoIterator<Item = PricingRule>) -> Result<Self, RuleSetError> {
        let rules = rules.into_iter();
        let mut indexed: FxHashMap<String, PricingRule> =
            FxHashMap::with_capacity_and_hasher(rules.size_hint().0, FxBuildHasher);

        for rule in rules {
            if indexed.contains_key(rule.sku()) {
                return Err(RuleSetError::DuplicateSku { sku: rule.sku });
            }

            indexed.insert(rule.sku.clone(), rule);
        }

        Ok(Self { rules: indexed })
    }

    /// Validate and index raw `(sku, unit_price, special_quantity, special_price)` definitions.
    ///
    /// Fails fast on the first invalid definition.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::InvalidRule`] for a definition that breaks a rule
    /// invariant, or [`RuleSetError::DuplicateSku`] for a repeated SKU.
    pub fn from_definitions<S: Into<String>>(
        definitions: impl IntoIterator<Item = (S, u64, Option<u64>, Option<u64>)>,
    ) -> Result<Self, RuleSetError> {
        let rules = definitions
            .into_iter()
            .map(|(sku, unit_price, special_quantity, special_price)| {
                PricingRule::new(sku, unit_price, special_quantity, special_price)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(rules)
    }

    /// Look up the rule for a SKU.
    pub fn get(&self, sku: &str) -> Option<&PricingRule> {
        self.rules.get(sku)
    }

    /// Check whether a SKU has a rule.
    pub fn contains(&self, sku: &str) -> bool {
        self.rules.contains_key(sku)
    }

    /// Iterate over all rules in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &PricingRule> {
        self.rules.values()
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
