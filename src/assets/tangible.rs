use crate::assets::error::AssetError;
use crate::assets::method::DepreciationMethod;
use crate::assets::{bounded_charge, checked, per_month, LongLivedAsset, MONTHS_PER_YEAR};
use crate::core::account::{Account, AccountCategory, Term};
use crate::core::asset_id::AssetId;
use crate::core::money::CurrencyValue;
use chrono::NaiveDate;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default useful life of computer equipment, in months.
pub const COMPUTER_LIFE_MONTHS: u32 = 60;

/// A tangible asset that loses book value through depreciation.
///
/// Cost, salvage value, life and production capacity are fixed when the
/// asset is built. Only [`depreciate`](DepreciableAsset::depreciate) and
/// [`reset`](DepreciableAsset::reset) change its state, and accumulated
/// depreciation always stays within `[0, depreciable_base]`.
///
/// # Examples
///
/// ```
/// use asset_depreciation::assets::method::DepreciationMethod;
/// use asset_depreciation::assets::tangible::DepreciableAsset;
/// use asset_depreciation::core::money::CurrencyValue;
/// use rust_decimal_macros::dec;
///
/// let mut press = DepreciableAsset::new("Press", 120, CurrencyValue::new(dec!(100_000)))
///     .with_salvage_value(dec!(10_000));
///
/// let charge = press.depreciate(&DepreciationMethod::double_declining(), 12).unwrap();
/// assert_eq!(charge, dec!(20_000));
/// assert_eq!(press.net_value(), dec!(80_000));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciableAsset {
    id: AssetId,
    /// Display only; not an identity key.
    name: String,
    /// Useful life in months.
    life: u32,
    acquisition_cost: CurrencyValue,
    salvage_value: CurrencyValue,
    /// Total units the asset can produce. Only units-of-production uses it.
    production_capacity: u64,
    placed_in_service: Option<NaiveDate>,
    remaining_life: u32,
    accumulated_depreciation: CurrencyValue,
}

impl DepreciableAsset {
    /// Create an asset with no salvage value and no production capacity.
    pub fn new(name: impl Into<String>, life: u32, acquisition_cost: CurrencyValue) -> Self {
        let zero = acquisition_cost.with_value(Decimal::ZERO);
        Self {
            id: AssetId::new(),
            name: name.into(),
            life,
            salvage_value: zero.clone(),
            acquisition_cost,
            production_capacity: 0,
            placed_in_service: None,
            remaining_life: life,
            accumulated_depreciation: zero,
        }
    }

    /// Computer equipment with the customary five-year life.
    pub fn computer(name: impl Into<String>, acquisition_cost: CurrencyValue) -> Self {
        Self::new(name, COMPUTER_LIFE_MONTHS, acquisition_cost)
    }

    /// Set the salvage value, denominated in the cost's currency.
    pub fn with_salvage_value(mut self, salvage_value: impl Into<Decimal>) -> Self {
        self.salvage_value = self.acquisition_cost.with_value(salvage_value.into());
        self
    }

    pub fn with_production_capacity(mut self, units: u64) -> Self {
        self.production_capacity = units;
        self
    }

    /// Use a specific ID (useful for testing / determinism).
    pub fn with_id(mut self, id: AssetId) -> Self {
        self.id = id;
        self
    }

    pub fn placed_in_service(mut self, date: NaiveDate) -> Self {
        self.placed_in_service = Some(date);
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> AssetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn remaining_life(&self) -> u32 {
        self.remaining_life
    }

    pub fn acquisition_cost(&self) -> &CurrencyValue {
        &self.acquisition_cost
    }

    pub fn salvage_value(&self) -> &CurrencyValue {
        &self.salvage_value
    }

    pub fn production_capacity(&self) -> u64 {
        self.production_capacity
    }

    pub fn placed_in_service_date(&self) -> Option<NaiveDate> {
        self.placed_in_service
    }

    pub fn accumulated_depreciation(&self) -> &CurrencyValue {
        &self.accumulated_depreciation
    }

    /// Alias of [`accumulated_depreciation`](Self::accumulated_depreciation).
    pub fn total_depreciation(&self) -> &CurrencyValue {
        &self.accumulated_depreciation
    }

    /// Total amount ever eligible for depreciation.
    pub fn depreciable_base(&self) -> CurrencyValue {
        self.acquisition_cost.with_value(
            self.acquisition_cost
                .value()
                .saturating_sub(self.salvage_value.value()),
        )
    }

    /// Book value: cost less accumulated depreciation.
    pub fn net_value(&self) -> CurrencyValue {
        self.acquisition_cost.with_value(
            self.acquisition_cost
                .value()
                .saturating_sub(self.accumulated_depreciation.value()),
        )
    }

    /// What is still depreciable. Zero once the asset is fully depreciated,
    /// so amounts that round away to nothing read as zero too.
    pub fn remaining_depreciable_value(&self) -> CurrencyValue {
        let remaining = self.acquisition_cost.with_value(
            self.acquisition_cost
                .value()
                .saturating_sub(self.accumulated_depreciation.value())
                .saturating_sub(self.salvage_value.value()),
        );
        if remaining <= Decimal::ZERO {
            remaining.with_value(Decimal::ZERO)
        } else {
            remaining
        }
    }

    /// `1 + 2 + ... + whole years of life`.
    pub fn sum_of_years_digits(&self) -> u64 {
        let years = u64::from(self.life / MONTHS_PER_YEAR);
        years * (years + 1) / 2
    }

    /// True once the remaining depreciable value rounds to zero or below.
    pub fn is_fully_depreciated(&self) -> bool {
        matches!(
            self.headroom(),
            Ok(headroom) if self.acquisition_cost.with_value(headroom) <= Decimal::ZERO
        )
    }

    fn headroom(&self) -> Result<Decimal, AssetError> {
        checked(
            self.acquisition_cost
                .value()
                .checked_sub(self.accumulated_depreciation.value())
                .and_then(|v| v.checked_sub(self.salvage_value.value())),
            "subtraction",
        )
    }

    /// Charge `periods` months of depreciation and return the amount applied.
    ///
    /// The formula amount is clamped to `[0, remaining_depreciable_value]`.
    /// A fully depreciated asset is left untouched and the call returns
    /// zero. Remaining life drops by `periods` for every method, saturating
    /// at zero.
    ///
    /// # Errors
    ///
    /// [`AssetError::DivisionByZero`] when the method's denominator is
    /// structurally zero: a zero life (straight-line, declining-balance), a
    /// life under one year (sum-of-years-digits), or a zero production
    /// capacity (units-of-production). [`AssetError::Arithmetic`] when cost,
    /// salvage and accumulated depreciation fall outside decimal range.
    pub fn depreciate(
        &mut self,
        method: &DepreciationMethod,
        periods: u32,
    ) -> Result<CurrencyValue, AssetError> {
        if self.is_fully_depreciated() {
            info!(
                "asset \"{}\" is fully depreciated; net value {}",
                self.name,
                self.net_value().format_with_decimals(true)
            );
            return Ok(self.acquisition_cost.with_value(Decimal::ZERO));
        }

        let headroom = self.headroom()?;
        let raw = self.raw_charge(method, periods)?;
        let charge = bounded_charge(raw, headroom);
        if charge != raw {
            debug!(
                "asset \"{}\": {} charge {} clamped to {}",
                self.name, method, raw, charge
            );
        }

        self.accumulated_depreciation += charge;
        self.remaining_life = self.remaining_life.saturating_sub(periods);
        debug!(
            "asset \"{}\": {} over {} periods charged {}, remaining life {}",
            self.name, method, periods, charge, self.remaining_life
        );

        Ok(self.acquisition_cost.with_value(charge))
    }

    fn raw_charge(&self, method: &DepreciationMethod, periods: u32) -> Result<Decimal, AssetError> {
        let periods = Decimal::from(periods);
        match *method {
            DepreciationMethod::StraightLine => {
                let monthly = per_month(self.depreciable_base().value(), self.life)?;
                checked(monthly.checked_mul(periods), "multiplication")
            }
            DepreciationMethod::DecliningBalance { factor } => {
                let monthly = per_month(self.net_value().value(), self.life)?;
                checked(
                    monthly
                        .checked_mul(factor)
                        .and_then(|v| v.checked_mul(periods)),
                    "multiplication",
                )
            }
            DepreciationMethod::SumOfYearsDigits => {
                let digits = self.sum_of_years_digits();
                if digits == 0 {
                    return Err(AssetError::DivisionByZero {
                        denominator: "sum of years' digits",
                    });
                }
                let years_left =
                    Decimal::from(self.remaining_life) / Decimal::from(MONTHS_PER_YEAR);
                checked(
                    self.depreciable_base()
                        .value()
                        .checked_mul(years_left)
                        .and_then(|v| v.checked_div(Decimal::from(digits))),
                    "sum-of-years-digits",
                )
            }
            DepreciationMethod::UnitsOfProduction { units } => {
                if self.production_capacity == 0 {
                    return Err(AssetError::DivisionByZero {
                        denominator: "production capacity",
                    });
                }
                checked(
                    self.headroom()?
                        .checked_div(Decimal::from(self.production_capacity))
                        .and_then(|v| v.checked_mul(Decimal::from(units))),
                    "units-of-production",
                )
            }
        }
    }

    /// Return to the freshly constructed state. Idempotent.
    pub fn reset(&mut self) {
        self.accumulated_depreciation = self.acquisition_cost.with_value(Decimal::ZERO);
        self.remaining_life = self.life;
    }

    /// The asset's cost account and its contra accumulated-depreciation account.
    pub fn ledger_accounts(&self) -> [Account; 2] {
        [
            Account::new(
                self.name.clone(),
                AccountCategory::Asset,
                self.acquisition_cost.clone(),
            )
            .with_term(Term::NonCurrent),
            Account::new(
                format!("Accumulated Depreciation - {}", self.name),
                AccountCategory::Asset,
                self.accumulated_depreciation.clone(),
            )
            .contra()
            .with_term(Term::NonCurrent),
        ]
    }
}

impl LongLivedAsset for DepreciableAsset {
    type Method = DepreciationMethod;

    fn id(&self) -> AssetId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn life(&self) -> u32 {
        self.life
    }

    fn remaining_life(&self) -> u32 {
        self.remaining_life
    }

    fn acquisition_cost(&self) -> &CurrencyValue {
        &self.acquisition_cost
    }

    fn total_charged(&self) -> &CurrencyValue {
        &self.accumulated_depreciation
    }

    fn net_value(&self) -> CurrencyValue {
        DepreciableAsset::net_value(self)
    }

    fn is_exhausted(&self) -> bool {
        self.is_fully_depreciated()
    }

    fn placed_in_service_date(&self) -> Option<NaiveDate> {
        self.placed_in_service
    }

    fn apply(&mut self, method: &DepreciationMethod, periods: u32) -> Result<CurrencyValue, AssetError> {
        self.depreciate(method, periods)
    }

    fn reset(&mut self) {
        DepreciableAsset::reset(self)
    }
}

impl fmt::Display for DepreciableAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has a life of {} months, a cost of {}, a salvage value of {}, and a production capacity of {} units.",
            self.name, self.life, self.acquisition_cost, self.salvage_value, self.production_capacity
        )
    }
}
