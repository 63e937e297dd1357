//! Upcoming-reminder computation and polling.
//!
//! # Responsibility
//! - Compute which open tasks/meetings fall inside their reminder window.
//! - Track already-notified items so repeated polls never re-notify.
//!
//! # Invariants
//! - `upcoming_reminders` is pure: same inputs, same output.
//! - Dedupe state lives only in [`ledger::NotificationLedger`].

pub mod ledger;
pub mod poller;
pub mod upcoming;
