//! Pure upcoming-reminder computation.
//!
//! # Responsibility
//! - Select incomplete tasks whose due timestamp falls within
//!   `[now, now + lookahead]`, lookahead chosen per task by meeting flag.
//!
//! # Invariants
//! - Completed, deleted and out-of-window tasks are never returned.
//! - Tasks without an explicit time are due at 09:00.
//! - Output is sorted ascending by due timestamp, uuid as tie-break.

use crate::model::settings::ReminderSettings;
use crate::model::task::{TaskId, TaskRecord};
use crate::model::school::SchoolId;
use chrono::NaiveDateTime;

/// One task qualifying for a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderItem {
    pub task_id: TaskId,
    pub school_uuid: Option<SchoolId>,
    pub title: String,
    /// Effective due timestamp (explicit time or the 09:00 default).
    pub due_at: NaiveDateTime,
    pub is_meeting: bool,
}

impl ReminderItem {
    fn from_task(task: &TaskRecord) -> Self {
        Self {
            task_id: task.uuid,
            school_uuid: task.school_uuid,
            title: task.title.clone(),
            due_at: task.due_at(),
            is_meeting: task.is_meeting,
        }
    }
}

/// Computes the subset of tasks due within their reminder window.
///
/// Pure and idempotent: callers poll this on a fixed cadence and diff the
/// result against a [`super::ledger::NotificationLedger`].
///
/// Gating, in order:
/// - global `notifications_enabled` off -> empty result;
/// - per-category flag (task/meeting) off -> that category is skipped;
/// - completed or soft-deleted tasks are skipped;
/// - window check `now <= due_at <= now + lookahead_for(is_meeting)`.
pub fn upcoming_reminders(
    tasks: &[TaskRecord],
    settings: &ReminderSettings,
    now: NaiveDateTime,
) -> Vec<ReminderItem> {
    if !settings.notifications_enabled {
        return Vec::new();
    }

    let mut items: Vec<ReminderItem> = tasks
        .iter()
        .filter(|task| task.is_active() && !task.is_completed)
        .filter(|task| settings.category_enabled(task.is_meeting))
        .filter(|task| {
            let due_at = task.due_at();
            let window_end = now + settings.lookahead_for(task.is_meeting);
            due_at >= now && due_at <= window_end
        })
        .map(ReminderItem::from_task)
        .collect();

    items.sort_by_key(|item| (item.due_at, item.task_id));
    items
}

#[cfg(test)]
mod tests {
    use super::upcoming_reminders;
    use crate::model::settings::ReminderSettings;
    use crate::model::task::TaskRecord;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn task_due(h: u32, m: u32, is_meeting: bool) -> TaskRecord {
        let mut task = TaskRecord::new("t", NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        task.due_time = NaiveTime::from_hms_opt(h, m, 0);
        task.is_meeting = is_meeting;
        task
    }

    #[test]
    fn master_toggle_off_yields_nothing() {
        let mut settings = ReminderSettings::default();
        settings.notifications_enabled = false;

        let tasks = vec![task_due(10, 0, false)];
        assert!(upcoming_reminders(&tasks, &settings, at(9, 55)).is_empty());
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let mut settings = ReminderSettings::default();
        settings.task_lookahead_minutes = 30;

        let now = at(10, 0);
        let at_start = task_due(10, 0, false);
        let at_end = task_due(10, 30, false);
        let past = task_due(9, 59, false);
        let beyond = task_due(10, 31, false);

        let items = upcoming_reminders(
            &[at_start.clone(), at_end.clone(), past, beyond],
            &settings,
            now,
        );
        let ids: Vec<_> = items.iter().map(|item| item.task_id).collect();
        assert_eq!(ids, vec![at_start.uuid, at_end.uuid]);
    }
}
