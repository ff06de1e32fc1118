//! Integration tests for checkout totals across strategies.
//!
//! Uses the classic kata price list:
//!
//! | SKU | Unit price | Offer      |
//! |-----|------------|------------|
//! | A   | 50         | 3 for 130  |
//! | B   | 30         | 2 for 45   |
//! | C   | 20         |            |
//! | D   | 15         |            |

use std::sync::Arc;

use proptest::prelude::*;
use rstest::rstest;
use testresult::TestResult;

use checkout::prelude::*;

fn kata_rules() -> Result<RuleSet, RuleSetError> {
    RuleSet::from_definitions([
        ("A", 50, Some(3), Some(130)),
        ("B", 30, Some(2), Some(45)),
        ("C", 20, None, None),
        ("D", 15, None, None),
    ])
}

#[rstest]
#[case(&[], 0)]
#[case(&["A"], 50)]
#[case(&["A", "B"], 80)]
#[case(&["C", "D", "B", "A"], 115)]
#[case(&["A", "A"], 100)]
#[case(&["A", "A", "A"], 130)]
#[case(&["A", "A", "A", "A"], 180)]
#[case(&["A", "A", "A", "A", "A"], 230)]
#[case(&["A", "A", "A", "A", "A", "A"], 260)]
#[case(&["A", "A", "A", "B"], 160)]
#[case(&["A", "A", "A", "B", "B"], 175)]
#[case(&["A", "A", "A", "B", "B", "D"], 190)]
#[case(&["D", "A", "B", "A", "B", "A"], 190)]
fn multi_buy_totals(#[case] skus: &[&str], #[case] expected: u64) -> TestResult {
    let mut checkout = Checkout::with_default_strategy(kata_rules()?)?;

    checkout.scan_all(skus.iter().copied())?;

    assert_eq!(checkout.total_price()?, expected);

    Ok(())
}

#[rstest]
#[case(PricingStrategyKind::MultiBuy, 190)]
#[case(PricingStrategyKind::BuyOneGetOneFree, 145)]
#[case(PricingStrategyKind::PercentageDiscount, 48)]
fn mixed_basket_by_strategy(
    #[case] kind: PricingStrategyKind,
    #[case] expected: u64,
) -> TestResult {
    let mut checkout = Checkout::with_strategy(kata_rules()?, kind)?;

    checkout.scan_all(["A", "A", "A", "B", "B", "D"])?;

    assert_eq!(checkout.total_price()?, expected);

    Ok(())
}

#[test]
fn unit_pricing_matches_quantity_times_price() -> TestResult {
    let pricing = PricingService::new(Arc::new(UnitPricing));
    let mut checkout = Checkout::new(kata_rules()?, pricing);

    checkout.scan_all(["A", "A", "A", "B", "B", "D"])?;

    assert_eq!(checkout.total_price()?, 150 + 60 + 15);

    Ok(())
}

#[test]
fn reading_the_total_twice_gives_the_same_value() -> TestResult {
    let mut checkout = Checkout::with_default_strategy(kata_rules()?)?;

    checkout.scan_all(["A", "B", "A"])?;

    let first = checkout.total_price()?;
    let second = checkout.total_price()?;

    assert_eq!(first, second);
    assert_eq!(checkout.tally().item_count(), 3);

    Ok(())
}

#[test]
fn unknown_sku_is_never_priced_as_zero() -> TestResult {
    let mut checkout = Checkout::with_default_strategy(kata_rules()?)?;

    checkout.scan_all(["A", "E", "B"])?;

    assert!(matches!(
        checkout.total_price(),
        Err(CheckoutError::Pricing(PricingError::UnknownSku { ref sku })) if sku == "E"
    ));

    let message = checkout
        .total_price()
        .err()
        .map(|err| err.to_string())
        .unwrap_or_default();

    assert!(message.contains("Unknown SKU 'E'"));

    Ok(())
}

#[rstest]
#[case(PricingStrategyKind::MultiBuy)]
#[case(PricingStrategyKind::BuyOneGetOneFree)]
#[case(PricingStrategyKind::PercentageDiscount)]
fn oversized_line_is_an_error_not_a_clamped_total(
    #[case] kind: PricingStrategyKind,
) -> TestResult {
    let rules = RuleSet::from_definitions([("A", u64::MAX / 2 + 1, None, None)])?;
    let mut checkout = Checkout::with_strategy(rules, kind)?;

    checkout.scan_all(["A", "A", "A"])?;

    assert_eq!(
        checkout.total_price(),
        Err(CheckoutError::Pricing(PricingError::LineOverflow {
            sku: "A".to_string()
        }))
    );

    Ok(())
}

#[test]
fn strategies_without_offers_fall_back_to_unit_price() -> TestResult {
    let factory = PricingStrategyFactory::new();

    for kind in [
        PricingStrategyKind::MultiBuy,
        PricingStrategyKind::PercentageDiscount,
    ] {
        let strategy = factory.strategy(kind)?;

        for quantity in 0..10 {
            assert_eq!(
                strategy.calculate_price(quantity, 35, None, None),
                Some(quantity * 35)
            );
        }
    }

    assert_eq!(UnitPricing.calculate_price(7, 35, None, None), Some(245));

    Ok(())
}

#[test]
fn sessions_share_rules_across_threads() -> TestResult {
    let rules = Arc::new(kata_rules()?);

    let handles: Vec<_> = PricingStrategyKind::ALL
        .into_iter()
        .map(|kind| {
            let rules = Arc::clone(&rules);

            let handle = std::thread::spawn(move || -> Result<u64, String> {
                let mut checkout =
                    Checkout::with_strategy(rules, kind).map_err(|err| err.to_string())?;

                checkout
                    .scan_all(["A", "A", "A", "B", "B", "D"])
                    .map_err(|err| err.to_string())?;

                checkout.total_price().map_err(|err| err.to_string())
            });

            (kind, handle)
        })
        .collect();

    let totals: Vec<Result<u64, String>> = handles
        .into_iter()
        .map(|(kind, handle)| {
            handle
                .join()
                .map_err(|_| format!("{kind} session thread panicked"))
                .and_then(|total| total)
        })
        .collect();

    assert_eq!(totals, vec![Ok(190), Ok(145), Ok(48)]);

    Ok(())
}

proptest! {
    /// Permuting the scan sequence never changes the total.
    #[test]
    fn scan_order_does_not_change_total(
        skus in Just(vec!["A", "A", "A", "B", "B", "D", "C", "A", "B"]).prop_shuffle()
    ) {
        let rules = kata_rules().map_err(|err| TestCaseError::fail(err.to_string()))?;
        let mut checkout = Checkout::with_default_strategy(rules)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        checkout
            .scan_all(skus.iter().copied())
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        let total = checkout
            .total_price()
            .map_err(|err| TestCaseError::fail(err.to_string()))?;

        // 4 x A = 180, 3 x B = 75, C = 20, D = 15
        prop_assert_eq!(total, 290);
    }

    /// Multi-buy never charges more than unit pricing.
    #[test]
    fn multi_buy_never_exceeds_unit_price(
        quantity in 0_u64..1_000,
        unit_price in 1_u64..1_000,
        set_size in 1_u64..10,
    ) {
        let regular = unit_price * set_size;
        let special_price = regular - 1;

        let discounted = MultiBuyPricing.calculate_price(
            quantity,
            unit_price,
            Some(set_size),
            Some(special_price),
        );

        let undiscounted = UnitPricing.calculate_price(quantity, unit_price, None, None);

        prop_assert!(discounted.is_some());
        prop_assert!(discounted <= undiscounted);
    }
}
