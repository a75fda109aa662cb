use asset_depreciation::assets::method::DepreciationMethod;
use asset_depreciation::assets::tangible::DepreciableAsset;
use asset_depreciation::core::money::{round_half_away, CurrencyValue};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Generate a random acquisition cost (100.00 to 1,000,000.00).
fn arb_cost() -> impl Strategy<Value = Decimal> {
    (10_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generate an asset whose salvage never exceeds cost and whose capacity is positive.
fn arb_asset() -> impl Strategy<Value = DepreciableAsset> {
    (arb_cost(), 0u32..=100, 1u32..=360, 1u64..=10_000).prop_map(
        |(cost, salvage_pct, life, capacity)| {
            let salvage = (cost * Decimal::from(salvage_pct) / Decimal::from(100)).round_dp(2);
            DepreciableAsset::new("Prop Asset", life, CurrencyValue::new(cost))
                .with_salvage_value(salvage)
                .with_production_capacity(capacity)
        },
    )
}

/// Generate any of the four methods with sensible parameters.
fn arb_method() -> impl Strategy<Value = DepreciationMethod> {
    prop_oneof![
        Just(DepreciationMethod::StraightLine),
        (1u32..=30).prop_map(|tenths| DepreciationMethod::DecliningBalance {
            factor: Decimal::new(tenths as i64, 1)
        }),
        Just(DepreciationMethod::SumOfYearsDigits),
        (0u64..=5_000).prop_map(|units| DepreciationMethod::UnitsOfProduction { units }),
    ]
}

/// A sequence of (method, periods) calls.
fn arb_calls() -> impl Strategy<Value = Vec<(DepreciationMethod, u32)>> {
    prop::collection::vec((arb_method(), 0u32..=48), 1..40)
}

/// SYD needs a whole year of life, so short-lived assets may reject it.
fn apply(asset: &mut DepreciableAsset, method: &DepreciationMethod, periods: u32) -> Option<CurrencyValue> {
    asset.depreciate(method, periods).ok()
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Accumulated depreciation stays within the base.
    //
    // However the calls are sequenced, 0 ≤ accumulated ≤ depreciable base
    // and net value never drops below salvage.
    // ===================================================================
    #[test]
    fn accumulated_stays_bounded(mut asset in arb_asset(), calls in arb_calls()) {
        for (method, periods) in &calls {
            apply(&mut asset, method, *periods);
            let accumulated = asset.accumulated_depreciation().rounded();
            prop_assert!(accumulated >= Decimal::ZERO);
            prop_assert!(accumulated <= asset.depreciable_base().rounded());
            prop_assert!(asset.net_value() >= *asset.salvage_value());
        }
    }

    // ===================================================================
    // INVARIANT 2: Charges are never negative.
    // ===================================================================
    #[test]
    fn charges_are_non_negative(mut asset in arb_asset(), calls in arb_calls()) {
        for (method, periods) in &calls {
            if let Some(charge) = apply(&mut asset, method, *periods) {
                prop_assert!(charge.value() >= Decimal::ZERO);
            }
        }
    }

    // ===================================================================
    // INVARIANT 3: Clamp is exact.
    //
    // When the formula asks for more than is left, the call returns exactly
    // the remaining depreciable value and the next call returns zero.
    // ===================================================================
    #[test]
    fn clamp_returns_exact_remainder(asset in arb_asset(), overshoot in 2u64..=10) {
        let mut asset = asset;
        let remaining = asset.remaining_depreciable_value();
        let units = asset.production_capacity() * overshoot;
        let method = DepreciationMethod::UnitsOfProduction { units };

        let charge = asset.depreciate(&method, 1).unwrap();
        prop_assert_eq!(charge.value(), remaining.value());
        prop_assert!(asset.depreciate(&method, 1).unwrap().is_zero());
        prop_assert_eq!(asset.net_value(), asset.salvage_value().clone());
    }

    // ===================================================================
    // INVARIANT 4: Reset then replay is deterministic.
    // ===================================================================
    #[test]
    fn reset_replay_is_deterministic(mut asset in arb_asset(), calls in arb_calls()) {
        let mut first = Vec::with_capacity(calls.len());
        for (method, periods) in &calls {
            apply(&mut asset, method, *periods);
            first.push(asset.net_value().value());
        }

        asset.reset();
        prop_assert!(asset.accumulated_depreciation().is_zero());
        prop_assert_eq!(asset.remaining_life(), asset.life());

        for ((method, periods), expected) in calls.iter().zip(&first) {
            apply(&mut asset, method, *periods);
            prop_assert_eq!(asset.net_value().value(), *expected);
        }
    }

    // ===================================================================
    // INVARIANT 5: Rounding is sign-symmetric, half away from zero.
    // ===================================================================
    #[test]
    fn rounding_is_sign_symmetric(mills in -10_000_000i64..10_000_000i64) {
        let value = Decimal::new(mills, 3);
        prop_assert_eq!(round_half_away(-value, 2), -round_half_away(value, 2));

        let rounded = CurrencyValue::new(value).rounded();
        prop_assert!((rounded - value).abs() <= Decimal::new(5, 3));
    }

    // ===================================================================
    // INVARIANT 6: Remaining life never underflows.
    //
    // A fully depreciated asset is a no-op and keeps its remaining life.
    // ===================================================================
    #[test]
    fn remaining_life_saturates(mut asset in arb_asset(), calls in arb_calls()) {
        for (method, periods) in &calls {
            let before = asset.remaining_life();
            let exhausted = asset.is_fully_depreciated();
            if apply(&mut asset, method, *periods).is_some() {
                let expected = if exhausted { before } else { before.saturating_sub(*periods) };
                prop_assert_eq!(asset.remaining_life(), expected);
            }
            prop_assert!(asset.remaining_life() <= asset.life());
        }
    }
}

#[test]
fn rounding_boundary_cases() {
    assert_eq!(CurrencyValue::new(Decimal::new(5, 3)).rounded(), Decimal::new(1, 2));
    assert_eq!(CurrencyValue::new(Decimal::new(-5, 3)).rounded(), Decimal::new(-1, 2));
    assert_eq!(CurrencyValue::new(Decimal::new(4, 3)).rounded(), Decimal::ZERO);
}
