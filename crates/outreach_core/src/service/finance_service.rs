//! Finance ledger use-case service.
//!
//! # Responsibility
//! - Provide income/expense recording entry points.
//! - Parse user-entered decimal amounts into integer cents.
//!
//! # Invariants
//! - Amounts are stored as positive integer cents; kind carries the sign.
//! - Mutations read the row back so callers always see persisted state.

use crate::model::finance::{FinanceId, FinanceKind, FinanceRecord};
use crate::repo::finance_repo::{FinanceListQuery, FinanceRepository};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)(?:\.(\d{1,2}))?\s*$").expect("valid amount regex"));

/// Service error for finance use-cases.
#[derive(Debug)]
pub enum FinanceServiceError {
    /// User-entered amount is not a plain positive decimal.
    InvalidAmount(String),
    /// Target record does not exist or is soft-deleted.
    RecordNotFound(FinanceId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for FinanceServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount(value) => write!(f, "invalid amount: `{value}`"),
            Self::RecordNotFound(id) => write!(f, "finance record not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent finance state: {details}")
            }
        }
    }
}

impl Error for FinanceServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FinanceServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::RecordNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Finance service facade over repository implementations.
pub struct FinanceService<R: FinanceRepository> {
    repo: R,
}

impl<R: FinanceRepository> FinanceService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records one income row from a user-entered decimal amount.
    pub fn record_income(
        &self,
        category: impl Into<String>,
        amount: &str,
        entry_date: NaiveDate,
        description: Option<String>,
    ) -> Result<FinanceRecord, FinanceServiceError> {
        self.record(FinanceKind::Income, category, amount, entry_date, description)
    }

    /// Records one expense row from a user-entered decimal amount.
    pub fn record_expense(
        &self,
        category: impl Into<String>,
        amount: &str,
        entry_date: NaiveDate,
        description: Option<String>,
    ) -> Result<FinanceRecord, FinanceServiceError> {
        self.record(
            FinanceKind::Expense,
            category,
            amount,
            entry_date,
            description,
        )
    }

    /// Updates an existing record by stable ID.
    pub fn update_record(
        &self,
        record: &FinanceRecord,
    ) -> Result<FinanceRecord, FinanceServiceError> {
        self.repo.update_record(record)?;
        self.repo
            .get_record(record.uuid, true)?
            .ok_or(FinanceServiceError::InconsistentState(
                "updated record not found in read-back",
            ))
    }

    /// Gets one record by ID with optional deleted-row visibility.
    pub fn get_record(
        &self,
        id: FinanceId,
        include_deleted: bool,
    ) -> RepoResult<Option<FinanceRecord>> {
        self.repo.get_record(id, include_deleted)
    }

    /// Lists records using kind/category/date-range filters.
    pub fn list_records(&self, query: &FinanceListQuery) -> RepoResult<Vec<FinanceRecord>> {
        self.repo.list_records(query)
    }

    /// Soft-deletes a record by ID.
    pub fn soft_delete_record(&self, id: FinanceId) -> RepoResult<()> {
        self.repo.soft_delete_record(id)
    }

    fn record(
        &self,
        kind: FinanceKind,
        category: impl Into<String>,
        amount: &str,
        entry_date: NaiveDate,
        description: Option<String>,
    ) -> Result<FinanceRecord, FinanceServiceError> {
        let amount_cents = parse_amount_cents(amount)?;
        let mut record = FinanceRecord::new(kind, category, amount_cents, entry_date);
        record.description = description;

        let id = self.repo.create_record(&record)?;
        self.repo
            .get_record(id, false)?
            .ok_or(FinanceServiceError::InconsistentState(
                "created record not found in read-back",
            ))
    }
}

/// Parses a user-entered decimal amount ("12.34") into positive cents.
///
/// Rules:
/// - At most two decimal places; one decimal digit means tenths ("1.5" = 150).
/// - No sign, grouping or currency symbols.
/// - Zero is rejected; amounts must be positive.
pub fn parse_amount_cents(value: &str) -> Result<i64, FinanceServiceError> {
    let captures = AMOUNT_RE
        .captures(value)
        .ok_or_else(|| FinanceServiceError::InvalidAmount(value.to_string()))?;

    let whole: i64 = captures
        .get(1)
        .map(|m| m.as_str())
        .unwrap_or("0")
        .parse()
        .map_err(|_| FinanceServiceError::InvalidAmount(value.to_string()))?;

    let cents_part = match captures.get(2).map(|m| m.as_str()) {
        Some(fraction) if fraction.len() == 1 => {
            fraction
                .parse::<i64>()
                .map_err(|_| FinanceServiceError::InvalidAmount(value.to_string()))?
                * 10
        }
        Some(fraction) => fraction
            .parse::<i64>()
            .map_err(|_| FinanceServiceError::InvalidAmount(value.to_string()))?,
        None => 0,
    };

    // Checked arithmetic: a digit string long enough to overflow i64 cents
    // still matches the regex and must come back as InvalidAmount.
    let total = whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(cents_part))
        .ok_or_else(|| FinanceServiceError::InvalidAmount(value.to_string()))?;
    if total <= 0 {
        return Err(FinanceServiceError::InvalidAmount(value.to_string()));
    }

    Ok(total)
}
