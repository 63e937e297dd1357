//! Core domain logic for the school-outreach CRM.
//! This crate is the single source of truth for business invariants.

pub mod dashboard;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod reminder;
pub mod repo;
pub mod service;
pub mod sync;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::finance::{FinanceKind, FinanceRecord};
pub use model::school::{PipelinePhase, School, SchoolId};
pub use model::settings::ReminderSettings;
pub use model::task::{TaskId, TaskRecord};
pub use reminder::ledger::NotificationLedger;
pub use reminder::poller::{LogSink, ReminderPoller, ReminderSink};
pub use reminder::upcoming::{upcoming_reminders, ReminderItem};
pub use repo::{RepoError, RepoResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
