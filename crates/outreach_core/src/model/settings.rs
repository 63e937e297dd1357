//! Reminder/notification settings model.
//!
//! # Responsibility
//! - Define the single settings record that drives reminder polling.
//!
//! # Invariants
//! - All interval values are at least one minute.
//! - Defaults here must stay in sync with the seeded settings row in
//!   `db/migrations/0004_settings.sql`.

use chrono::Duration as ChronoDuration;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

const DEFAULT_POLL_INTERVAL_MINUTES: u32 = 5;
const DEFAULT_TASK_LOOKAHEAD_MINUTES: u32 = 1440;
const DEFAULT_MEETING_LOOKAHEAD_MINUTES: u32 = 60;

/// Settings validation failure reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsValidationError {
    /// Poll interval below one minute.
    PollIntervalTooSmall(u32),
    /// A look-ahead window below one minute.
    LookaheadTooSmall { field: &'static str, minutes: u32 },
}

impl Display for SettingsValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PollIntervalTooSmall(minutes) => {
                write!(f, "poll interval must be >= 1 minute, got {minutes}")
            }
            Self::LookaheadTooSmall { field, minutes } => {
                write!(f, "{field} must be >= 1 minute, got {minutes}")
            }
        }
    }
}

impl Error for SettingsValidationError {}

/// Notification and reminder-window configuration.
///
/// One row exists per database; the reminder poller reads it to derive its
/// cadence and look-ahead windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    /// Master toggle; when off no reminders are produced at all.
    pub notifications_enabled: bool,
    /// Poll cadence in minutes.
    pub poll_interval_minutes: u32,
    /// Look-ahead window for plain tasks, in minutes.
    pub task_lookahead_minutes: u32,
    /// Look-ahead window for meetings, in minutes.
    pub meeting_lookahead_minutes: u32,
    /// Per-category flag for plain tasks.
    pub task_reminders_enabled: bool,
    /// Per-category flag for meetings.
    pub meeting_reminders_enabled: bool,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            poll_interval_minutes: DEFAULT_POLL_INTERVAL_MINUTES,
            task_lookahead_minutes: DEFAULT_TASK_LOOKAHEAD_MINUTES,
            meeting_lookahead_minutes: DEFAULT_MEETING_LOOKAHEAD_MINUTES,
            task_reminders_enabled: true,
            meeting_reminders_enabled: true,
        }
    }
}

impl ReminderSettings {
    /// Validates interval invariants before persistence.
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        if self.poll_interval_minutes == 0 {
            return Err(SettingsValidationError::PollIntervalTooSmall(
                self.poll_interval_minutes,
            ));
        }
        if self.task_lookahead_minutes == 0 {
            return Err(SettingsValidationError::LookaheadTooSmall {
                field: "task_lookahead_minutes",
                minutes: self.task_lookahead_minutes,
            });
        }
        if self.meeting_lookahead_minutes == 0 {
            return Err(SettingsValidationError::LookaheadTooSmall {
                field: "meeting_lookahead_minutes",
                minutes: self.meeting_lookahead_minutes,
            });
        }
        Ok(())
    }

    /// Poll cadence as a wall-clock duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.poll_interval_minutes) * 60)
    }

    /// Look-ahead window selected by the task's meeting flag.
    pub fn lookahead_for(&self, is_meeting: bool) -> ChronoDuration {
        let minutes = if is_meeting {
            self.meeting_lookahead_minutes
        } else {
            self.task_lookahead_minutes
        };
        ChronoDuration::minutes(i64::from(minutes))
    }

    /// Per-category enable flag selected by the task's meeting flag.
    pub fn category_enabled(&self, is_meeting: bool) -> bool {
        if is_meeting {
            self.meeting_reminders_enabled
        } else {
            self.task_reminders_enabled
        }
    }
}
