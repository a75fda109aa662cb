use crate::assets::error::AssetError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Periods charged when the caller does not say otherwise (one year of months).
pub const DEFAULT_PERIODS: u32 = 12;

/// Declining-balance factor when none is given (100%).
pub const DEFAULT_DECLINE_FACTOR: Decimal = Decimal::ONE;

/// Depreciation formula for tangible assets.
///
/// Numeric selectors (0 to 3) map onto the variants in declaration order.
/// Parameters that only one method uses live on that variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DepreciationMethod {
    /// `depreciable_base / life × periods`
    StraightLine,
    /// `net_value / life × factor × periods`. Salvage value only bounds the clamp.
    DecliningBalance { factor: Decimal },
    /// `depreciable_base × (remaining_life / 12) / sum_of_years_digits`
    SumOfYearsDigits,
    /// `remaining_depreciable_value / production_capacity × units`
    UnitsOfProduction { units: u64 },
}

impl DepreciationMethod {
    const SUPPORTED: &'static str = "0 straight-line, 1 declining-balance, 2 sum-of-years-digits, 3 units-of-production";

    /// Resolve a numeric selector. `decline_factor` and `units_produced` are
    /// ignored by the methods that do not use them.
    ///
    /// ```
    /// use asset_depreciation::assets::method::DepreciationMethod;
    /// use rust_decimal_macros::dec;
    ///
    /// let method = DepreciationMethod::from_selector(1, dec!(2.0), 0).unwrap();
    /// assert_eq!(method, DepreciationMethod::DecliningBalance { factor: dec!(2) });
    /// assert!(DepreciationMethod::from_selector(4, dec!(1), 0).is_err());
    /// ```
    pub fn from_selector(
        selector: u8,
        decline_factor: Decimal,
        units_produced: u64,
    ) -> Result<Self, AssetError> {
        match selector {
            0 => Ok(DepreciationMethod::StraightLine),
            1 => Ok(DepreciationMethod::DecliningBalance {
                factor: decline_factor,
            }),
            2 => Ok(DepreciationMethod::SumOfYearsDigits),
            3 => Ok(DepreciationMethod::UnitsOfProduction {
                units: units_produced,
            }),
            _ => Err(AssetError::InvalidMethodSelector {
                selector,
                supported: Self::SUPPORTED,
            }),
        }
    }

    /// Declining balance at [`DEFAULT_DECLINE_FACTOR`].
    pub fn declining_balance() -> Self {
        DepreciationMethod::DecliningBalance {
            factor: DEFAULT_DECLINE_FACTOR,
        }
    }

    /// Double-declining balance (200%).
    pub fn double_declining() -> Self {
        DepreciationMethod::DecliningBalance { factor: dec!(2) }
    }

    pub fn selector(&self) -> u8 {
        match self {
            DepreciationMethod::StraightLine => 0,
            DepreciationMethod::DecliningBalance { .. } => 1,
            DepreciationMethod::SumOfYearsDigits => 2,
            DepreciationMethod::UnitsOfProduction { .. } => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DepreciationMethod::StraightLine => "straight-line",
            DepreciationMethod::DecliningBalance { .. } => "declining-balance",
            DepreciationMethod::SumOfYearsDigits => "sum-of-years-digits",
            DepreciationMethod::UnitsOfProduction { .. } => "units-of-production",
        }
    }
}

impl fmt::Display for DepreciationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepreciationMethod::DecliningBalance { factor } => {
                write!(f, "{} ({}%)", self.name(), percent(*factor))
            }
            DepreciationMethod::UnitsOfProduction { units } => {
                write!(f, "{} ({} units)", self.name(), units)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Amortization formula for intangible assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum AmortizationMethod {
    /// `acquisition_cost / life × periods`
    StraightLine,
    /// `net_value / life × factor × periods`
    DecliningBalance { factor: Decimal },
}

impl AmortizationMethod {
    const SUPPORTED: &'static str = "0 straight-line, 1 declining-balance";

    pub fn from_selector(selector: u8, decline_factor: Decimal) -> Result<Self, AssetError> {
        match selector {
            0 => Ok(AmortizationMethod::StraightLine),
            1 => Ok(AmortizationMethod::DecliningBalance {
                factor: decline_factor,
            }),
            _ => Err(AssetError::InvalidMethodSelector {
                selector,
                supported: Self::SUPPORTED,
            }),
        }
    }

    pub fn selector(&self) -> u8 {
        match self {
            AmortizationMethod::StraightLine => 0,
            AmortizationMethod::DecliningBalance { .. } => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AmortizationMethod::StraightLine => "straight-line",
            AmortizationMethod::DecliningBalance { .. } => "declining-balance",
        }
    }
}

impl fmt::Display for AmortizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmortizationMethod::DecliningBalance { factor } => {
                write!(f, "{} ({}%)", self.name(), percent(*factor))
            }
            AmortizationMethod::StraightLine => f.write_str(self.name()),
        }
    }
}

fn percent(factor: Decimal) -> Decimal {
    (factor * Decimal::ONE_HUNDRED).normalize()
}
