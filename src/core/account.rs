use crate::core::money::CurrencyValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the ledger on which an account normally carries its balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalBalance {
    Debit,
    Credit,
}

impl NormalBalance {
    pub fn opposite(self) -> Self {
        match self {
            NormalBalance::Debit => NormalBalance::Credit,
            NormalBalance::Credit => NormalBalance::Debit,
        }
    }
}

impl fmt::Display for NormalBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalBalance::Debit => f.write_str("debit"),
            NormalBalance::Credit => f.write_str("credit"),
        }
    }
}

/// Financial-statement category of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountCategory {
    /// Default normal balance for the category; contra accounts take the opposite side.
    pub fn normal_balance(self, contra: bool) -> NormalBalance {
        let normal = match self {
            AccountCategory::Asset | AccountCategory::Expense => NormalBalance::Debit,
            AccountCategory::Liability | AccountCategory::Equity | AccountCategory::Revenue => {
                NormalBalance::Credit
            }
        };
        if contra {
            normal.opposite()
        } else {
            normal
        }
    }
}

/// Balance-sheet classification by time horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Current,
    NonCurrent,
}

/// A ledger account holding a single balance.
///
/// `balance` is always stored as a positive amount on the account's normal
/// side; [`true_balance`](Account::true_balance) gives the signed
/// debit-positive figure used when accounts are summed together.
///
/// # Examples
///
/// ```
/// use asset_depreciation::core::account::{Account, AccountCategory};
/// use asset_depreciation::core::money::CurrencyValue;
/// use rust_decimal_macros::dec;
///
/// let equipment = Account::new("Equipment", AccountCategory::Asset, CurrencyValue::new(dec!(100_000)));
/// let accumulated = Account::new("Accumulated Depreciation", AccountCategory::Asset, CurrencyValue::new(dec!(20_000)))
///     .contra();
///
/// let net = equipment.true_balance() + accumulated.true_balance();
/// assert_eq!(net, dec!(80_000));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    name: String,
    category: AccountCategory,
    normal_balance: NormalBalance,
    balance: CurrencyValue,
    contra: bool,
    term: Option<Term>,
}

impl Account {
    pub fn new(name: impl Into<String>, category: AccountCategory, balance: CurrencyValue) -> Self {
        Self {
            name: name.into(),
            category,
            normal_balance: category.normal_balance(false),
            balance,
            contra: false,
            term: None,
        }
    }

    /// Mark as a contra account, flipping its normal balance.
    pub fn contra(mut self) -> Self {
        self.contra = true;
        self.normal_balance = self.category.normal_balance(true);
        self
    }

    pub fn with_term(mut self, term: Term) -> Self {
        self.term = Some(term);
        self
    }

    // --- Accessors ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> AccountCategory {
        self.category
    }

    pub fn normal_balance(&self) -> NormalBalance {
        self.normal_balance
    }

    pub fn balance(&self) -> &CurrencyValue {
        &self.balance
    }

    pub fn is_contra(&self) -> bool {
        self.contra
    }

    pub fn term(&self) -> Option<Term> {
        self.term
    }

    /// Signed balance: debits positive, credits negative.
    pub fn true_balance(&self) -> CurrencyValue {
        match self.normal_balance {
            NormalBalance::Debit => self.balance.clone(),
            NormalBalance::Credit => -&self.balance,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        writeln!(f, "    Normal balance: {}", self.normal_balance)?;
        match self.term {
            Some(Term::Current) => writeln!(f, "    Term: current")?,
            Some(Term::NonCurrent) => writeln!(f, "    Term: non-current")?,
            None => writeln!(f, "    Term: none")?,
        }
        write!(f, "    Balance: {}", self.balance)
    }
}
