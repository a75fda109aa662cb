use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use thiserror::Error;

/// Symbol used when none is given.
pub const DEFAULT_SYMBOL: &str = "$";

/// Number of decimal places used for comparisons and `rounded()`.
pub const CENT_PLACES: u32 = 2;

static SHOW_DECIMALS: AtomicBool = AtomicBool::new(false);

/// Toggle whether `Display` renders cents. Affects formatting only, never stored precision.
pub fn set_show_decimals(show: bool) {
    SHOW_DECIMALS.store(show, AtomicOrdering::Relaxed);
}

/// Current state of the process-wide display toggle.
pub fn show_decimals() -> bool {
    SHOW_DECIMALS.load(AtomicOrdering::Relaxed)
}

/// Errors arising from currency arithmetic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoneyError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("{operation} result is out of decimal range")]
    OutOfRange { operation: &'static str },
    #[error("{0} cannot be represented as a currency value")]
    NotRepresentable(f64),
}

/// Round `value` to `dp` decimal places, resolving ties away from zero.
///
/// The value is scaled so the last kept digit becomes the units digit, the
/// fractional remainder is split off, and one unit is added in the direction
/// of the sign whenever `|remainder| >= 0.5`.
///
/// ```
/// use asset_depreciation::core::money::round_half_away;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_half_away(dec!(0.005), 2), dec!(0.01));
/// assert_eq!(round_half_away(dec!(-0.005), 2), dec!(-0.01));
/// assert_eq!(round_half_away(dec!(2.5), 0), dec!(3));
/// ```
pub fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    let Some(scale) = 10u64.checked_pow(dp).map(Decimal::from) else {
        return value;
    };
    // Beyond this magnitude there is no sub-unit precision left to round.
    let Some(scaled) = value.checked_mul(scale) else {
        return value;
    };

    let whole = scaled.trunc();
    let remainder = (scaled - whole).abs();
    let units = if remainder < dec!(0.5) {
        whole
    } else if scaled.is_sign_negative() {
        whole - Decimal::ONE
    } else {
        whole + Decimal::ONE
    };
    units / scale
}

/// A monetary amount with a display symbol.
///
/// Arithmetic keeps the full precision of the underlying decimal. Only
/// [`rounded`](CurrencyValue::rounded), comparisons and display apply
/// cent rounding (half away from zero), so long arithmetic chains never
/// accumulate rounding error while equality matches what a reader sees.
///
/// The symbol never takes part in comparisons. Results of binary operations
/// carry the symbol of the left-hand `CurrencyValue`, or of the only one
/// when the other operand is a plain number.
///
/// # Examples
///
/// ```
/// use asset_depreciation::core::money::CurrencyValue;
/// use rust_decimal_macros::dec;
///
/// let a = CurrencyValue::new(dec!(10_000.101));
/// let b = CurrencyValue::with_symbol(dec!(20_000.202), "€");
///
/// let sum = a + b;
/// assert_eq!(sum.value(), dec!(30_000.303));
/// assert_eq!(sum, dec!(30_000.30));
/// assert_eq!(sum.symbol(), "$");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyValue {
    /// Unrounded magnitude.
    value: Decimal,
    symbol: String,
}

impl CurrencyValue {
    pub fn new(value: impl Into<Decimal>) -> Self {
        Self::with_symbol(value, DEFAULT_SYMBOL)
    }

    pub fn with_symbol(value: impl Into<Decimal>, symbol: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            symbol: symbol.into(),
        }
    }

    pub fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    /// Build from a binary float. Fails for NaN and infinities.
    pub fn try_from_f64(value: f64, symbol: impl Into<String>) -> Result<Self, MoneyError> {
        let magnitude = Decimal::try_from(value).map_err(|_| MoneyError::NotRepresentable(value))?;
        Ok(Self::with_symbol(magnitude, symbol))
    }

    /// The raw, unrounded magnitude.
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Magnitude rounded half away from zero to cents.
    pub fn rounded(&self) -> Decimal {
        round_half_away(self.value, CENT_PLACES)
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn abs(&self) -> Self {
        self.with_value(self.value.abs())
    }

    /// Same symbol, different magnitude.
    pub fn with_value(&self, value: Decimal) -> Self {
        Self {
            value,
            symbol: self.symbol.clone(),
        }
    }

    pub fn checked_div(&self, rhs: impl Into<Decimal>) -> Result<Self, MoneyError> {
        let rhs = rhs.into();
        if rhs.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        self.value
            .checked_div(rhs)
            .map(|v| self.with_value(v))
            .ok_or(MoneyError::OutOfRange {
                operation: "division",
            })
    }

    /// Quotient floored toward negative infinity.
    pub fn floor_div(&self, rhs: impl Into<Decimal>) -> Result<Self, MoneyError> {
        let quotient = self.checked_div(rhs)?;
        Ok(self.with_value(quotient.value.floor()))
    }

    /// Remainder consistent with [`floor_div`](Self::floor_div): the result
    /// takes the sign of the divisor.
    pub fn checked_rem(&self, rhs: impl Into<Decimal>) -> Result<Self, MoneyError> {
        let rhs = rhs.into();
        let quotient = self.floor_div(rhs)?;
        let product = rhs
            .checked_mul(quotient.value)
            .ok_or(MoneyError::OutOfRange {
                operation: "modulo",
            })?;
        Ok(self.with_value(self.value - product))
    }

    pub fn pow(&self, exponent: i64) -> Result<Self, MoneyError> {
        if self.value.is_zero() && exponent < 0 {
            return Err(MoneyError::DivisionByZero);
        }
        self.value
            .checked_powi(exponent)
            .map(|v| self.with_value(v))
            .ok_or(MoneyError::OutOfRange { operation: "power" })
    }

    pub fn pow_decimal(&self, exponent: Decimal) -> Result<Self, MoneyError> {
        if self.value.is_zero() && exponent.is_sign_negative() && !exponent.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        self.value
            .checked_powd(exponent)
            .map(|v| self.with_value(v))
            .ok_or(MoneyError::OutOfRange { operation: "power" })
    }

    /// Render with or without cents, independent of the display toggle.
    pub fn format_with_decimals(&self, decimals: bool) -> String {
        let dp = if decimals { CENT_PLACES } else { 0 };
        let mut shown = round_half_away(self.value, dp);
        shown.rescale(dp);

        let sign = if shown.is_sign_negative() && !shown.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = shown.abs().to_string();
        match digits.split_once('.') {
            Some((whole, cents)) => {
                format!("{}{}{}.{}", sign, self.symbol, group_thousands(whole), cents)
            }
            None => format!("{}{}{}", sign, self.symbol, group_thousands(&digits)),
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Default for CurrencyValue {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for CurrencyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_decimals(show_decimals()))
    }
}

impl From<CurrencyValue> for Decimal {
    fn from(v: CurrencyValue) -> Self {
        v.value
    }
}

impl From<&CurrencyValue> for Decimal {
    fn from(v: &CurrencyValue) -> Self {
        v.value
    }
}

// --- Comparisons (rounded) ---

impl PartialEq for CurrencyValue {
    fn eq(&self, other: &Self) -> bool {
        self.rounded() == other.rounded()
    }
}

impl Eq for CurrencyValue {}

impl PartialOrd for CurrencyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CurrencyValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rounded().cmp(&other.rounded())
    }
}

impl Hash for CurrencyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rounded().hash(state);
    }
}

impl PartialEq<Decimal> for CurrencyValue {
    fn eq(&self, other: &Decimal) -> bool {
        self.rounded() == round_half_away(*other, CENT_PLACES)
    }
}

impl PartialEq<CurrencyValue> for Decimal {
    fn eq(&self, other: &CurrencyValue) -> bool {
        other == self
    }
}

impl PartialOrd<Decimal> for CurrencyValue {
    fn partial_cmp(&self, other: &Decimal) -> Option<Ordering> {
        Some(self.rounded().cmp(&round_half_away(*other, CENT_PLACES)))
    }
}

impl PartialOrd<CurrencyValue> for Decimal {
    fn partial_cmp(&self, other: &CurrencyValue) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

// --- Arithmetic (unrounded) ---

impl<T: Into<Decimal>> Add<T> for CurrencyValue {
    type Output = CurrencyValue;

    fn add(self, rhs: T) -> CurrencyValue {
        CurrencyValue {
            value: self.value + rhs.into(),
            symbol: self.symbol,
        }
    }
}

impl<T: Into<Decimal>> Add<T> for &CurrencyValue {
    type Output = CurrencyValue;

    fn add(self, rhs: T) -> CurrencyValue {
        self.with_value(self.value + rhs.into())
    }
}

impl<T: Into<Decimal>> Sub<T> for CurrencyValue {
    type Output = CurrencyValue;

    fn sub(self, rhs: T) -> CurrencyValue {
        CurrencyValue {
            value: self.value - rhs.into(),
            symbol: self.symbol,
        }
    }
}

impl<T: Into<Decimal>> Sub<T> for &CurrencyValue {
    type Output = CurrencyValue;

    fn sub(self, rhs: T) -> CurrencyValue {
        self.with_value(self.value - rhs.into())
    }
}

impl<T: Into<Decimal>> Mul<T> for CurrencyValue {
    type Output = CurrencyValue;

    fn mul(self, rhs: T) -> CurrencyValue {
        CurrencyValue {
            value: self.value * rhs.into(),
            symbol: self.symbol,
        }
    }
}

impl<T: Into<Decimal>> Mul<T> for &CurrencyValue {
    type Output = CurrencyValue;

    fn mul(self, rhs: T) -> CurrencyValue {
        self.with_value(self.value * rhs.into())
    }
}

/// Plain numbers on the left-hand side take the symbol of the currency operand.
macro_rules! scalar_lhs_ops {
    ($($t:ty),*) => {
        $(
            impl Add<CurrencyValue> for $t {
                type Output = CurrencyValue;

                fn add(self, rhs: CurrencyValue) -> CurrencyValue {
                    rhs.with_value(Decimal::from(self) + rhs.value)
                }
            }

            impl Sub<CurrencyValue> for $t {
                type Output = CurrencyValue;

                fn sub(self, rhs: CurrencyValue) -> CurrencyValue {
                    rhs.with_value(Decimal::from(self) - rhs.value)
                }
            }

            impl Mul<CurrencyValue> for $t {
                type Output = CurrencyValue;

                fn mul(self, rhs: CurrencyValue) -> CurrencyValue {
                    rhs.with_value(Decimal::from(self) * rhs.value)
                }
            }
        )*
    };
}

scalar_lhs_ops!(Decimal, i32, i64, u32, u64);

impl Neg for CurrencyValue {
    type Output = CurrencyValue;

    fn neg(self) -> CurrencyValue {
        CurrencyValue {
            value: -self.value,
            symbol: self.symbol,
        }
    }
}

impl Neg for &CurrencyValue {
    type Output = CurrencyValue;

    fn neg(self) -> CurrencyValue {
        self.with_value(-self.value)
    }
}

impl<T: Into<Decimal>> AddAssign<T> for CurrencyValue {
    fn add_assign(&mut self, rhs: T) {
        self.value += rhs.into();
    }
}

impl<T: Into<Decimal>> SubAssign<T> for CurrencyValue {
    fn sub_assign(&mut self, rhs: T) {
        self.value -= rhs.into();
    }
}

impl Sum for CurrencyValue {
    fn sum<I: Iterator<Item = CurrencyValue>>(iter: I) -> Self {
        iter.fold(None, |acc: Option<CurrencyValue>, v| match acc {
            Some(total) => Some(total + v),
            None => Some(v),
        })
        .unwrap_or_default()
    }
}

impl<'a> Sum<&'a CurrencyValue> for CurrencyValue {
    fn sum<I: Iterator<Item = &'a CurrencyValue>>(iter: I) -> Self {
        iter.cloned().sum()
    }
}
