use crate::core::money::MoneyError;
use thiserror::Error;

/// Errors arising from depreciation and amortization.
///
/// Over-depreciation is not an error: charges are clamped and the returned
/// amount reports what was actually applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    #[error("division by zero: {denominator} is zero")]
    DivisionByZero { denominator: &'static str },
    #[error("invalid method selector {selector} (supported: {supported})")]
    InvalidMethodSelector {
        selector: u8,
        supported: &'static str,
    },
    #[error(transparent)]
    Arithmetic(#[from] MoneyError),
}
