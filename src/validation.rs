// Input Validation
// Classifies raw CLI arguments (amount, memo, id) before anything touches the store

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

// ============================================================================
// VALIDATION ERRORS
// ============================================================================

/// Input errors reported to the user. These are never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Amount cannot be empty.")]
    EmptyAmount,

    #[error("Invalid amount format. Use format like\n2341.23")]
    InvalidAmountFormat,

    #[error("Memo cannot be empty.")]
    EmptyMemo,

    #[error("Invalid memo format.")]
    InvalidMemoFormat,

    #[error("The id cannot be empty.")]
    EmptyId,

    #[error("Invalid id format.")]
    InvalidIdFormat,
}

// ============================================================================
// PATTERNS
// ============================================================================

fn re_amount() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{1,4}\.[0-9]{1,2}$").unwrap())
}

fn re_memo() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]{1,20}( [A-Za-z]{1,20})?$").unwrap())
}

fn re_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[1-9][0-9]*$").unwrap())
}

// ============================================================================
// VALIDATED VALUES
// ============================================================================

/// Fixed-precision amount held as whole cents (0 to 999_999).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(i64);

impl Amount {
    pub fn from_cents(cents: i64) -> Self {
        Amount(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so width/alignment flags from the row formatter apply
        f.pad(&format!("{}.{:02}", self.0 / 100, self.0 % 100))
    }
}

/// One or two alphabetic words separated by a single space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memo(String);

impl Memo {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Id as typed by the user. Always digits without a leading zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Numeric value, or `None` when the digits overflow an `i64`
    /// (no stored row can carry such an id).
    pub fn value(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// CHECKS
// ============================================================================

pub fn validate_amount(raw: &str) -> Result<Amount, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }
    if !re_amount().is_match(raw) {
        return Err(ValidationError::InvalidAmountFormat);
    }

    let (whole, fraction) = raw
        .split_once('.')
        .ok_or(ValidationError::InvalidAmountFormat)?;
    let whole: i64 = whole.parse().map_err(|_| ValidationError::InvalidAmountFormat)?;
    // "12.5" means 12.50
    let fraction: i64 = format!("{fraction:0<2}")
        .parse()
        .map_err(|_| ValidationError::InvalidAmountFormat)?;

    Ok(Amount(whole * 100 + fraction))
}

pub fn validate_memo(raw: &str) -> Result<Memo, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::EmptyMemo);
    }
    if !re_memo().is_match(raw) {
        return Err(ValidationError::InvalidMemoFormat);
    }
    Ok(Memo(raw.to_string()))
}

pub fn validate_id(raw: &str) -> Result<ExpenseId, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if !re_id().is_match(raw) {
        return Err(ValidationError::InvalidIdFormat);
    }
    Ok(ExpenseId(raw.to_string()))
}

/// Amount first, then memo; the first failure wins.
pub fn validate_new_expense(amount: &str, memo: &str) -> Result<(Amount, Memo), ValidationError> {
    let amount = validate_amount(amount)?;
    let memo = validate_memo(memo)?;
    Ok((amount, memo))
}

// ============================================================================
// TESTS
// ============================================================================
