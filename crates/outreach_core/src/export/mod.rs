//! CSV export of the core record types.
//!
//! # Responsibility
//! - Render school, task, and finance snapshots as CSV documents for
//!   backup and spreadsheet use.
//!
//! # Invariants
//! - Tombstoned rows are excluded.
//! - Row order matches the order of the input slice, so exports follow
//!   the repository's deterministic listing order.
//! - Amounts render as decimal currency strings (`12.50`), never raw
//!   cents.

pub mod csv;

use crate::model::finance::FinanceRecord;
use crate::model::school::School;
use crate::model::task::TaskRecord;
use csv::csv_document;

/// Renders integer cents as a `units.cc` decimal string.
///
/// Stored amounts are positive, but net figures can go below zero; the
/// sign is emitted once, in front of the whole number.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!("{sign}{}.{:02}", magnitude / 100, magnitude % 100)
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Renders active schools as a CSV document.
pub fn schools_csv(schools: &[School]) -> String {
    let header = [
        "uuid",
        "name",
        "contact_name",
        "contact_email",
        "contact_phone",
        "phase",
        "notes",
    ];
    let rows: Vec<Vec<String>> = schools
        .iter()
        .filter(|s| s.is_active())
        .map(|s| {
            vec![
                s.uuid.to_string(),
                s.name.clone(),
                opt(&s.contact_name),
                opt(&s.contact_email),
                opt(&s.contact_phone),
                s.phase.as_str().to_string(),
                opt(&s.notes),
            ]
        })
        .collect();
    csv_document(&header, &rows)
}

/// Renders active tasks as a CSV document.
///
/// The `due_time` column is empty when the task uses the default time.
pub fn tasks_csv(tasks: &[TaskRecord]) -> String {
    let header = [
        "uuid",
        "school_uuid",
        "title",
        "due_date",
        "due_time",
        "is_meeting",
        "is_completed",
    ];
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .filter(|t| t.is_active())
        .map(|t| {
            vec![
                t.uuid.to_string(),
                t.school_uuid.map(|u| u.to_string()).unwrap_or_default(),
                t.title.clone(),
                t.due_date.format("%Y-%m-%d").to_string(),
                t.due_time
                    .map(|time| time.format("%H:%M").to_string())
                    .unwrap_or_default(),
                t.is_meeting.to_string(),
                t.is_completed.to_string(),
            ]
        })
        .collect();
    csv_document(&header, &rows)
}

/// Renders active finance records as a CSV document.
pub fn finance_csv(records: &[FinanceRecord]) -> String {
    let header = ["uuid", "kind", "category", "amount", "entry_date", "description"];
    let rows: Vec<Vec<String>> = records
        .iter()
        .filter(|r| r.is_active())
        .map(|r| {
            vec![
                r.uuid.to_string(),
                r.kind.as_str().to_string(),
                r.category.clone(),
                format_cents(r.amount_cents),
                r.entry_date.format("%Y-%m-%d").to_string(),
                opt(&r.description),
            ]
        })
        .collect();
    csv_document(&header, &rows)
}
