//! Task/meeting domain model.
//!
//! # Responsibility
//! - Define the task record shared by list, calendar and reminder views.
//! - Compute the effective due timestamp used for reminder windows.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another task.
//! - A task without an explicit `due_time` is due at [`default_due_time`].
//! - `is_completed` tasks never qualify for reminders.

use crate::model::school::SchoolId;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task or meeting.
pub type TaskId = Uuid;

/// Effective due time for tasks that carry a date but no explicit time.
pub fn default_due_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is a valid time")
}

/// Task validation failure reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task/meeting record.
///
/// Meetings are ordinary tasks with `is_meeting = true`; the flag selects
/// which reminder look-ahead window applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Stable global ID used for linking, sync mapping and auditing.
    pub uuid: TaskId,
    /// Owning school, when the task belongs to one lead.
    pub school_uuid: Option<SchoolId>,
    /// Short action title.
    pub title: String,
    /// Calendar date the task is due.
    pub due_date: NaiveDate,
    /// Optional wall-clock time. `None` means due at [`default_due_time`].
    pub due_time: Option<NaiveTime>,
    /// Selects the meeting look-ahead window for reminders.
    pub is_meeting: bool,
    /// Completion flag.
    pub is_completed: bool,
    /// Soft delete tombstone.
    pub is_deleted: bool,
}

impl TaskRecord {
    /// Creates a new open task with a generated stable ID.
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self::with_id(Uuid::new_v4(), title, due_date)
    }

    /// Creates a task with a caller-provided stable ID.
    pub fn with_id(uuid: TaskId, title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            uuid,
            school_uuid: None,
            title: title.into(),
            due_date,
            due_time: None,
            is_meeting: false,
            is_completed: false,
            is_deleted: false,
        }
    }

    /// Validates record-level invariants before persistence.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Effective due timestamp: `due_date` at `due_time` or 09:00.
    pub fn due_at(&self) -> NaiveDateTime {
        self.due_date
            .and_time(self.due_time.unwrap_or_else(default_due_time))
    }

    /// Marks the task complete.
    pub fn complete(&mut self) {
        self.is_completed = true;
    }

    /// Reopens a completed task.
    pub fn reopen(&mut self) {
        self.is_completed = false;
    }

    /// Marks this task as softly deleted (tombstoned).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this task should be considered visible/active.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

#[cfg(test)]
mod tests {
    use super::{default_due_time, TaskRecord, TaskValidationError};
    use chrono::{NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn due_at_defaults_to_nine_in_the_morning() {
        let task = TaskRecord::new("call back", date(2025, 3, 4));
        assert_eq!(task.due_at(), date(2025, 3, 4).and_time(default_due_time()));
    }

    #[test]
    fn due_at_uses_explicit_time_when_present() {
        let mut task = TaskRecord::new("site visit", date(2025, 3, 4));
        task.due_time = NaiveTime::from_hms_opt(14, 30, 0);
        assert_eq!(
            task.due_at(),
            date(2025, 3, 4).and_time(NaiveTime::from_hms_opt(14, 30, 0).unwrap())
        );
    }

    #[test]
    fn validate_rejects_blank_title() {
        let task = TaskRecord::new("  ", date(2025, 1, 1));
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyTitle));
    }
}
