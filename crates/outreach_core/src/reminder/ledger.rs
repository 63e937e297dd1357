//! Already-notified tracking for reminder polls.
//!
//! # Responsibility
//! - Remember which reminder items were already surfaced.
//!
//! # Invariants
//! - Keys combine due timestamp and title, so rescheduling or renaming a
//!   task makes it eligible to notify again.

use crate::reminder::upcoming::ReminderItem;
use std::collections::HashSet;

/// Composite dedupe key for a reminder item.
pub fn reminder_key(item: &ReminderItem) -> String {
    format!("{}|{}", item.due_at.and_utc().timestamp_millis(), item.title)
}

/// Set of reminder keys that were already delivered.
///
/// Held by the poll loop for the process lifetime; [`clear`] exists for
/// long-lived hosts that want to reset after settings changes.
///
/// [`clear`]: NotificationLedger::clear
#[derive(Debug, Default)]
pub struct NotificationLedger {
    seen: HashSet<String>,
}

impl NotificationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Returns whether this item was already delivered.
    pub fn contains(&self, item: &ReminderItem) -> bool {
        self.seen.contains(&reminder_key(item))
    }

    /// Keeps only items not seen before, recording them as delivered.
    ///
    /// Input ordering is preserved, so ascending due-time order survives
    /// the diff.
    pub fn take_new(&mut self, items: Vec<ReminderItem>) -> Vec<ReminderItem> {
        items
            .into_iter()
            .filter(|item| self.seen.insert(reminder_key(item)))
            .collect()
    }

    /// Forgets all delivered keys.
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::NotificationLedger;
    use crate::model::task::TaskRecord;
    use crate::reminder::upcoming::{upcoming_reminders, ReminderItem};
    use crate::model::settings::ReminderSettings;
    use chrono::NaiveDate;

    fn items() -> Vec<ReminderItem> {
        let task = TaskRecord::new("call", NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        let now = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        upcoming_reminders(&[task], &ReminderSettings::default(), now)
    }

    #[test]
    fn take_new_filters_repeats() {
        let mut ledger = NotificationLedger::new();
        let first = ledger.take_new(items());
        assert_eq!(first.len(), 1);

        let second = ledger.take_new(items());
        assert!(second.is_empty());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn clear_makes_items_eligible_again() {
        let mut ledger = NotificationLedger::new();
        assert_eq!(ledger.take_new(items()).len(), 1);

        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.take_new(items()).len(), 1);
    }
}
