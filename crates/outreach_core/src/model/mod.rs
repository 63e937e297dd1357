//! Domain models for the CRM core.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep per-record validation rules next to the records they protect.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID.
//! - Deletion is represented by soft-delete tombstones, not hard delete.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod finance;
pub mod library;
pub mod school;
pub mod settings;
pub mod task;

/// Validation failure from any domain model.
///
/// Repositories wrap this into `RepoError::Validation` so write paths carry
/// the concrete per-model cause without one error enum per repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    School(school::SchoolValidationError),
    Task(task::TaskValidationError),
    Finance(finance::FinanceValidationError),
    Library(library::LibraryValidationError),
    Settings(settings::SettingsValidationError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::School(err) => write!(f, "{err}"),
            Self::Task(err) => write!(f, "{err}"),
            Self::Finance(err) => write!(f, "{err}"),
            Self::Library(err) => write!(f, "{err}"),
            Self::Settings(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ValidationError {}

impl From<school::SchoolValidationError> for ValidationError {
    fn from(value: school::SchoolValidationError) -> Self {
        Self::School(value)
    }
}

impl From<task::TaskValidationError> for ValidationError {
    fn from(value: task::TaskValidationError) -> Self {
        Self::Task(value)
    }
}

impl From<finance::FinanceValidationError> for ValidationError {
    fn from(value: finance::FinanceValidationError) -> Self {
        Self::Finance(value)
    }
}

impl From<library::LibraryValidationError> for ValidationError {
    fn from(value: library::LibraryValidationError) -> Self {
        Self::Library(value)
    }
}

impl From<settings::SettingsValidationError> for ValidationError {
    fn from(value: settings::SettingsValidationError) -> Self {
        Self::Settings(value)
    }
}
