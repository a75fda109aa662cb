//! Depreciable and amortizable long-lived assets.
//!
//! Both kinds share one shape: a fixed acquisition cost and useful life,
//! plus a running total of the cost already charged off. Every charge is
//! computed from a method formula and then clamped to what is still
//! chargeable, so the running total never exceeds its bound.

pub mod error;
pub mod intangible;
pub mod method;
pub mod register;
pub mod tangible;

use crate::assets::error::AssetError;
use crate::core::asset_id::AssetId;
use crate::core::money::{CurrencyValue, MoneyError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Common read/charge surface over tangible and intangible assets.
pub trait LongLivedAsset {
    /// The method selector accepted by [`apply`](LongLivedAsset::apply).
    type Method: Copy + fmt::Display;

    fn id(&self) -> AssetId;
    fn name(&self) -> &str;
    /// Useful life in months.
    fn life(&self) -> u32;
    fn remaining_life(&self) -> u32;
    fn acquisition_cost(&self) -> &CurrencyValue;
    /// Accumulated depreciation or amortization.
    fn total_charged(&self) -> &CurrencyValue;
    fn net_value(&self) -> CurrencyValue;
    /// True once nothing more can be charged.
    fn is_exhausted(&self) -> bool;
    fn placed_in_service_date(&self) -> Option<NaiveDate>;
    /// Charge `periods` months with `method`, returning the amount actually applied.
    fn apply(&mut self, method: &Self::Method, periods: u32) -> Result<CurrencyValue, AssetError>;
    fn reset(&mut self);
}

/// Clamp a raw formula amount into `[0, headroom]`.
pub(crate) fn bounded_charge(raw: Decimal, headroom: Decimal) -> Decimal {
    raw.max(Decimal::ZERO).min(headroom)
}

/// `amount / life`, failing when the life is zero.
pub(crate) fn per_month(amount: Decimal, life: u32) -> Result<Decimal, AssetError> {
    if life == 0 {
        return Err(AssetError::DivisionByZero {
            denominator: "useful life",
        });
    }
    checked(amount.checked_div(Decimal::from(life)), "division")
}

pub(crate) fn checked(value: Option<Decimal>, operation: &'static str) -> Result<Decimal, AssetError> {
    value.ok_or(AssetError::Arithmetic(MoneyError::OutOfRange { operation }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bounded_charge() {
        assert_eq!(bounded_charge(dec!(50), dec!(100)), dec!(50));
        assert_eq!(bounded_charge(dec!(150), dec!(100)), dec!(100));
        assert_eq!(bounded_charge(dec!(-5), dec!(100)), Decimal::ZERO);
    }

    #[test]
    fn test_per_month_zero_life() {
        assert_eq!(
            per_month(dec!(1000), 0),
            Err(AssetError::DivisionByZero {
                denominator: "useful life"
            })
        );
        assert_eq!(per_month(dec!(1200), 12).unwrap(), dec!(100));
    }

    fn identify<A: LongLivedAsset>(asset: &A) -> (AssetId, String) {
        (LongLivedAsset::id(asset), asset.name().to_string())
    }

    #[test]
    fn test_trait_identity_matches_asset() {
        let id = AssetId::new();
        let machine = tangible::DepreciableAsset::new("Mill", 60, CurrencyValue::new(dec!(5_000)))
            .with_id(id);
        let licence = intangible::AmortizableAsset::new("Licence", 36, CurrencyValue::new(dec!(900)));

        assert_eq!(identify(&machine), (id, "Mill".to_string()));
        assert_eq!(identify(&licence).0, licence.id());
    }
}
