//! Finance record domain model.
//!
//! # Responsibility
//! - Define the unified income/expense ledger record.
//!
//! # Invariants
//! - Amounts are positive integer cents; the `kind` carries the sign.
//! - `is_deleted` is the source of truth for tombstone state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a finance record.
pub type FinanceId = Uuid;

/// Ledger direction for a finance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinanceKind {
    Income,
    Expense,
}

impl FinanceKind {
    /// Canonical storage/export string for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Parses the canonical storage string back to a kind.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// Finance validation failure reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinanceValidationError {
    /// Amount must be a positive number of cents.
    AmountNotPositive(i64),
    /// Category is empty or whitespace-only.
    EmptyCategory,
}

impl Display for FinanceValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AmountNotPositive(cents) => {
                write!(f, "finance amount must be positive, got {cents} cents")
            }
            Self::EmptyCategory => write!(f, "finance category cannot be empty"),
        }
    }
}

impl Error for FinanceValidationError {}

/// One row of the income/expense ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceRecord {
    /// Stable global ID.
    pub uuid: FinanceId,
    /// Income or expense.
    pub kind: FinanceKind,
    /// User category, e.g. `materials` or `tuition`.
    pub category: String,
    /// Magnitude in cents; always positive.
    pub amount_cents: i64,
    /// Date the amount was earned or spent.
    pub entry_date: NaiveDate,
    /// Free-form description.
    pub description: Option<String>,
    /// Soft delete tombstone.
    pub is_deleted: bool,
}

impl FinanceRecord {
    /// Creates a new ledger row with a generated stable ID.
    pub fn new(
        kind: FinanceKind,
        category: impl Into<String>,
        amount_cents: i64,
        entry_date: NaiveDate,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), kind, category, amount_cents, entry_date)
    }

    /// Creates a ledger row with a caller-provided stable ID.
    pub fn with_id(
        uuid: FinanceId,
        kind: FinanceKind,
        category: impl Into<String>,
        amount_cents: i64,
        entry_date: NaiveDate,
    ) -> Self {
        Self {
            uuid,
            kind,
            category: category.into(),
            amount_cents,
            entry_date,
            description: None,
            is_deleted: false,
        }
    }

    /// Validates record-level invariants before persistence.
    pub fn validate(&self) -> Result<(), FinanceValidationError> {
        if self.amount_cents <= 0 {
            return Err(FinanceValidationError::AmountNotPositive(self.amount_cents));
        }
        if self.category.trim().is_empty() {
            return Err(FinanceValidationError::EmptyCategory);
        }
        Ok(())
    }

    /// Marks this record as softly deleted (tombstoned).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Returns whether this record should be considered visible/active.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

#[cfg(test)]
mod tests {
    use super::{FinanceKind, FinanceRecord, FinanceValidationError};
    use chrono::NaiveDate;

    #[test]
    fn validate_rejects_zero_and_negative_amounts() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let zero = FinanceRecord::new(FinanceKind::Expense, "materials", 0, date);
        assert_eq!(
            zero.validate(),
            Err(FinanceValidationError::AmountNotPositive(0))
        );

        let negative = FinanceRecord::new(FinanceKind::Income, "tuition", -500, date);
        assert_eq!(
            negative.validate(),
            Err(FinanceValidationError::AmountNotPositive(-500))
        );
    }

    #[test]
    fn validate_rejects_blank_category() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let record = FinanceRecord::new(FinanceKind::Expense, "  ", 100, date);
        assert_eq!(
            record.validate(),
            Err(FinanceValidationError::EmptyCategory)
        );
    }

    #[test]
    fn kind_strings_round_trip() {
        assert_eq!(FinanceKind::parse("income"), Some(FinanceKind::Income));
        assert_eq!(FinanceKind::parse("expense"), Some(FinanceKind::Expense));
        assert_eq!(FinanceKind::parse("transfer"), None);
    }
}
