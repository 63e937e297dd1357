//! Poll-driven reminder delivery.
//!
//! # Responsibility
//! - Run the upcoming-reminder computation on a schedule and hand newly
//!   due items to a delivery sink exactly once each.
//!
//! # Invariants
//! - A disabled master toggle yields no deliveries and records nothing.
//! - Items are delivered in ascending due-time order.

use crate::model::settings::ReminderSettings;
use crate::model::task::TaskRecord;
use crate::reminder::ledger::NotificationLedger;
use crate::reminder::upcoming::{upcoming_reminders, ReminderItem};
use chrono::NaiveDateTime;
use std::time::Duration;

/// Destination for due reminders.
///
/// The core stays headless; hosts plug in desktop notifications, a TUI
/// banner, or anything else behind this trait. [`LogSink`] is the
/// built-in default.
pub trait ReminderSink {
    fn deliver(&mut self, item: &ReminderItem);
}

/// Sink that writes each reminder as a structured log line.
#[derive(Debug, Default)]
pub struct LogSink;

impl ReminderSink for LogSink {
    fn deliver(&mut self, item: &ReminderItem) {
        log::info!(
            "event=reminder_due module=reminder status=ok task={} meeting={} due_at={} title={}",
            item.task_id,
            item.is_meeting,
            item.due_at,
            item.title
        );
    }
}

/// Repeated poll loop state: settings, delivered-key ledger, and sink.
///
/// The host owns the clock and the task snapshot; each tick it calls
/// [`poll`] with the current wall-clock time and whatever task list it
/// loaded, then sleeps [`poll_interval`].
///
/// [`poll`]: ReminderPoller::poll
/// [`poll_interval`]: ReminderPoller::poll_interval
pub struct ReminderPoller<S: ReminderSink> {
    settings: ReminderSettings,
    ledger: NotificationLedger,
    sink: S,
}

impl<S: ReminderSink> ReminderPoller<S> {
    pub fn new(settings: ReminderSettings, sink: S) -> Self {
        Self {
            settings,
            ledger: NotificationLedger::new(),
            sink,
        }
    }

    /// Replaces the settings used by subsequent polls.
    ///
    /// The ledger is kept; already-delivered items stay delivered even
    /// when lookahead windows widen.
    pub fn update_settings(&mut self, settings: ReminderSettings) {
        self.settings = settings;
    }

    pub fn poll_interval(&self) -> Duration {
        self.settings.poll_interval()
    }

    /// Computes upcoming reminders at `now`, delivers the ones not seen
    /// before, and returns them.
    pub fn poll(&mut self, tasks: &[TaskRecord], now: NaiveDateTime) -> Vec<ReminderItem> {
        let due = upcoming_reminders(tasks, &self.settings, now);
        let fresh = self.ledger.take_new(due);
        for item in &fresh {
            self.sink.deliver(item);
        }
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::{ReminderPoller, ReminderSink};
    use crate::model::settings::ReminderSettings;
    use crate::model::task::TaskRecord;
    use crate::reminder::upcoming::ReminderItem;
    use chrono::{Duration, NaiveDate};

    #[derive(Default)]
    struct RecordingSink {
        delivered: Vec<String>,
    }

    impl ReminderSink for RecordingSink {
        fn deliver(&mut self, item: &ReminderItem) {
            self.delivered.push(item.title.clone());
        }
    }

    #[test]
    fn poll_delivers_each_item_once() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let tasks = vec![TaskRecord::new("follow up", today)];
        let now = today.and_hms_opt(8, 0, 0).unwrap();

        let mut poller = ReminderPoller::new(ReminderSettings::default(), RecordingSink::default());

        let first = poller.poll(&tasks, now);
        assert_eq!(first.len(), 1);

        let second = poller.poll(&tasks, now + Duration::minutes(5));
        assert!(second.is_empty());
        assert_eq!(poller.sink.delivered, vec!["follow up".to_string()]);
    }

    #[test]
    fn poll_interval_comes_from_settings() {
        let mut settings = ReminderSettings::default();
        settings.poll_interval_minutes = 7;
        let poller = ReminderPoller::new(settings, RecordingSink::default());
        assert_eq!(poller.poll_interval(), std::time::Duration::from_secs(7 * 60));
    }
}
