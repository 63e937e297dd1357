//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce model `validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - SQLite repositories verify schema readiness before first use.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::ValidationError;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod finance_repo;
pub mod library_repo;
pub mod mapping_repo;
pub mod school_repo;
pub mod settings_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error shared by all CRM persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Model-level validation failed before the write.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target row does not exist or is soft-deleted.
    NotFound(Uuid),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<crate::model::school::SchoolValidationError> for RepoError {
    fn from(value: crate::model::school::SchoolValidationError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<crate::model::task::TaskValidationError> for RepoError {
    fn from(value: crate::model::task::TaskValidationError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<crate::model::finance::FinanceValidationError> for RepoError {
    fn from(value: crate::model::finance::FinanceValidationError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<crate::model::library::LibraryValidationError> for RepoError {
    fn from(value: crate::model::library::LibraryValidationError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<crate::model::settings::SettingsValidationError> for RepoError {
    fn from(value: crate::model::settings::SettingsValidationError) -> Self {
        Self::Validation(value.into())
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies that the connection was migrated and carries the expected shape.
///
/// Called by every SQLite repository constructor so broken or raw
/// connections fail loudly instead of producing partial query errors later.
pub(crate) fn ensure_schema_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn parse_bool_column(value: i64, table: &str, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {table}.{column}"
        ))),
    }
}

pub(crate) fn parse_uuid_column(value: &str, table: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{value}` in {table}.{column}"))
    })
}

pub(crate) fn parse_date_column(value: &str, table: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        RepoError::InvalidData(format!("invalid date value `{value}` in {table}.{column}"))
    })
}

pub(crate) fn parse_time_column(value: &str, table: &str, column: &str) -> RepoResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        RepoError::InvalidData(format!("invalid time value `{value}` in {table}.{column}"))
    })
}

pub(crate) fn date_to_db(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub(crate) fn time_to_db(value: NaiveTime) -> String {
    value.format("%H:%M").to_string()
}
