use crate::assets::error::AssetError;
use crate::assets::LongLivedAsset;
use crate::core::money::CurrencyValue;
use chrono::{Months, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on projection steps when the caller has no better limit.
pub const DEFAULT_MAX_STEPS: u32 = 600;

/// One step of a projected schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based step number.
    pub step: u32,
    /// Amount charged in this step.
    pub charge: CurrencyValue,
    /// Running total charged after this step.
    pub accumulated: CurrencyValue,
    pub net_value: CurrencyValue,
    pub remaining_life: u32,
    /// End of the step, when the asset has a placed-in-service date.
    pub period_end: Option<NaiveDate>,
}

/// A projected depreciation or amortization schedule for one asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationSchedule {
    pub asset_name: String,
    pub method: String,
    pub periods_per_step: u32,
    entries: Vec<ScheduleEntry>,
}

impl DepreciationSchedule {
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all charges in the schedule.
    pub fn total_charge(&self) -> CurrencyValue {
        self.entries.iter().map(|e| &e.charge).sum()
    }

    /// Book value after the last step, if any step was charged.
    pub fn final_net_value(&self) -> Option<&CurrencyValue> {
        self.entries.last().map(|e| &e.net_value)
    }
}

impl fmt::Display for DepreciationSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== {} ({}, {} periods/step) ===",
            self.asset_name, self.method, self.periods_per_step
        )?;
        writeln!(
            f,
            "{:>5} {:>12} {:>18} {:>18} {:>18} {:>6}",
            "Step", "Period End", "Charge", "Accumulated", "Net Value", "Life"
        )?;
        for entry in &self.entries {
            let period_end = entry
                .period_end
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "{:>5} {:>12} {:>18} {:>18} {:>18} {:>6}",
                entry.step,
                period_end,
                entry.charge.to_string(),
                entry.accumulated.to_string(),
                entry.net_value.to_string(),
                entry.remaining_life
            )?;
        }
        write!(f, "Total charged: {}", self.total_charge())
    }
}

/// Project the schedule `asset` would follow under `method`.
///
/// Works on a clone, so the caller's asset is untouched. Steps of
/// `periods_per_step` months are applied until the asset is exhausted, its
/// remaining life reaches zero, a step charges nothing, or `max_steps` is hit.
///
/// # Examples
///
/// ```
/// use asset_depreciation::assets::method::DepreciationMethod;
/// use asset_depreciation::assets::tangible::DepreciableAsset;
/// use asset_depreciation::core::money::CurrencyValue;
/// use asset_depreciation::projection::schedule::{project_schedule, DEFAULT_MAX_STEPS};
/// use rust_decimal_macros::dec;
///
/// let asset = DepreciableAsset::new("Drill", 36, CurrencyValue::new(dec!(9_000)));
/// let schedule = project_schedule(&asset, &DepreciationMethod::StraightLine, 12, DEFAULT_MAX_STEPS).unwrap();
///
/// assert_eq!(schedule.len(), 3);
/// assert_eq!(schedule.total_charge(), dec!(9_000));
/// assert!(asset.accumulated_depreciation().is_zero());
/// ```
pub fn project_schedule<A>(
    asset: &A,
    method: &A::Method,
    periods_per_step: u32,
    max_steps: u32,
) -> Result<DepreciationSchedule, AssetError>
where
    A: LongLivedAsset + Clone,
{
    let mut working = asset.clone();
    let mut entries = Vec::new();
    let mut elapsed = working.life().saturating_sub(working.remaining_life());

    for step in 1..=max_steps {
        if working.is_exhausted() || working.remaining_life() == 0 {
            break;
        }
        let charge = working.apply(method, periods_per_step)?;
        if charge.is_zero() {
            break;
        }
        elapsed = elapsed.saturating_add(periods_per_step);
        let period_end = working
            .placed_in_service_date()
            .and_then(|d| d.checked_add_months(Months::new(elapsed)));

        entries.push(ScheduleEntry {
            step,
            charge,
            accumulated: working.total_charged().clone(),
            net_value: working.net_value(),
            remaining_life: working.remaining_life(),
            period_end,
        });
    }

    debug!(
        "projected {} steps for \"{}\" ({}) using {}",
        entries.len(),
        asset.name(),
        asset.id(),
        method
    );

    Ok(DepreciationSchedule {
        asset_name: asset.name().to_string(),
        method: method.to_string(),
        periods_per_step,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::intangible::AmortizableAsset;
    use crate::assets::method::{AmortizationMethod, DepreciationMethod};
    use crate::assets::tangible::DepreciableAsset;
    use rust_decimal_macros::dec;

    fn press() -> DepreciableAsset {
        DepreciableAsset::new("Press", 120, CurrencyValue::new(dec!(100_000)))
    }

    #[test]
    fn test_straight_line_schedule() {
        let schedule =
            project_schedule(&press(), &DepreciationMethod::StraightLine, 12, DEFAULT_MAX_STEPS)
                .unwrap();
        assert_eq!(schedule.len(), 10);
        assert!(schedule.entries().iter().all(|e| e.charge == dec!(10_000)));
        assert_eq!(schedule.final_net_value().unwrap(), &CurrencyValue::zero());
        assert_eq!(schedule.entries()[3].accumulated, dec!(40_000));
        assert_eq!(schedule.entries()[3].remaining_life, 72);
    }

    #[test]
    fn test_sum_of_years_digits_schedule_consumes_base() {
        let asset = press().with_salvage_value(dec!(10_000));
        let schedule =
            project_schedule(&asset, &DepreciationMethod::SumOfYearsDigits, 12, DEFAULT_MAX_STEPS)
                .unwrap();
        assert_eq!(schedule.len(), 10);
        assert_eq!(schedule.entries()[0].charge, dec!(16_363.64));
        assert_eq!(schedule.entries()[9].charge, dec!(1_636.36));
        assert_eq!(schedule.total_charge(), dec!(90_000));
        assert_eq!(schedule.final_net_value().unwrap(), &CurrencyValue::new(dec!(10_000)));
    }

    #[test]
    fn test_declining_balance_schedule_stops_at_end_of_life() {
        let asset = press().with_salvage_value(dec!(10_000));
        let schedule = project_schedule(
            &asset,
            &DepreciationMethod::double_declining(),
            12,
            DEFAULT_MAX_STEPS,
        )
        .unwrap();
        assert_eq!(schedule.len(), 10);
        assert_eq!(schedule.entries()[1].charge, dec!(16_000));
        assert_eq!(schedule.final_net_value().unwrap(), &CurrencyValue::new(dec!(10_737.42)));
    }

    #[test]
    fn test_period_end_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let asset = press().placed_in_service(start);
        let schedule =
            project_schedule(&asset, &DepreciationMethod::StraightLine, 12, 2).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(
            schedule.entries()[0].period_end,
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        assert_eq!(
            schedule.entries()[1].period_end,
            NaiveDate::from_ymd_opt(2026, 1, 31)
        );
    }

    #[test]
    fn test_projection_leaves_asset_untouched() {
        let mut asset = press();
        asset.depreciate(&DepreciationMethod::StraightLine, 24).unwrap();
        let schedule =
            project_schedule(&asset, &DepreciationMethod::StraightLine, 12, DEFAULT_MAX_STEPS)
                .unwrap();
        assert_eq!(schedule.len(), 8);
        assert_eq!(asset.net_value(), dec!(80_000));
        assert_eq!(asset.remaining_life(), 96);
    }

    #[test]
    fn test_amortization_schedule() {
        let patent = AmortizableAsset::new("Patent", 60, CurrencyValue::new(dec!(30_000)));
        let schedule =
            project_schedule(&patent, &AmortizationMethod::StraightLine, 12, DEFAULT_MAX_STEPS)
                .unwrap();
        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule.total_charge(), dec!(30_000));
        assert_eq!(schedule.method, "straight-line");
    }

    #[test]
    fn test_projection_propagates_errors() {
        let result = project_schedule(
            &press(),
            &DepreciationMethod::UnitsOfProduction { units: 10 },
            1,
            DEFAULT_MAX_STEPS,
        );
        assert!(matches!(result, Err(AssetError::DivisionByZero { .. })));
    }

    #[test]
    fn test_units_of_production_schedule() {
        let asset = press().with_production_capacity(1_000);
        let schedule = project_schedule(
            &asset,
            &DepreciationMethod::UnitsOfProduction { units: 250 },
            12,
            DEFAULT_MAX_STEPS,
        )
        .unwrap();
        // Each step takes a quarter of what is left, so only the life bound stops it.
        assert_eq!(schedule.len(), 10);
        assert_eq!(schedule.entries()[0].charge, dec!(25_000));
        assert_eq!(schedule.entries()[1].charge, dec!(18_750));
    }
}
