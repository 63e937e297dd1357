//! In-memory dashboard rollups.
//!
//! # Responsibility
//! - Aggregate pipeline, finance, and task snapshots into the numbers
//!   the dashboard screens show.
//!
//! # Invariants
//! - Tombstoned rows never contribute to any rollup.
//! - All functions are pure; callers load the snapshots through the
//!   repositories and pass them in.

use crate::model::finance::{FinanceKind, FinanceRecord};
use crate::model::school::{PipelinePhase, School};
use crate::model::task::TaskRecord;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// One pipeline phase with its school count and share of the total.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSlice {
    pub phase: PipelinePhase,
    pub count: usize,
    /// Share of active schools in percent, `0.0` when there are none.
    pub percent: f64,
}

/// Counts active schools per pipeline phase.
///
/// Every phase appears in the result, in pipeline order, even with a
/// zero count.
pub fn pipeline_breakdown(schools: &[School]) -> Vec<PhaseSlice> {
    let active: Vec<&School> = schools.iter().filter(|s| s.is_active()).collect();
    let total = active.len();

    PipelinePhase::ALL
        .iter()
        .map(|&phase| {
            let count = active.iter().filter(|s| s.phase == phase).count();
            let percent = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            PhaseSlice {
                phase,
                count,
                percent,
            }
        })
        .collect()
}

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub income_cents: i64,
    pub expense_cents: i64,
}

impl MonthlyTotal {
    pub fn net_cents(&self) -> i64 {
        self.income_cents - self.expense_cents
    }
}

/// Groups active finance records into per-month totals, ascending.
///
/// Months with no records are absent; the chart layer decides whether
/// to zero-fill gaps.
pub fn monthly_totals(records: &[FinanceRecord]) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<(i32, u32), (i64, i64)> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_active()) {
        let key = (record.entry_date.year(), record.entry_date.month());
        let bucket = buckets.entry(key).or_insert((0, 0));
        match record.kind {
            FinanceKind::Income => bucket.0 += record.amount_cents,
            FinanceKind::Expense => bucket.1 += record.amount_cents,
        }
    }

    buckets
        .into_iter()
        .map(|((year, month), (income_cents, expense_cents))| MonthlyTotal {
            year,
            month,
            income_cents,
            expense_cents,
        })
        .collect()
}

/// Totals over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinanceSummary {
    pub income_cents: i64,
    pub expense_cents: i64,
    pub record_count: usize,
}

impl FinanceSummary {
    pub fn net_cents(&self) -> i64 {
        self.income_cents - self.expense_cents
    }
}

/// Sums active records whose entry date falls in `[from, to]`.
pub fn finance_summary(records: &[FinanceRecord], from: NaiveDate, to: NaiveDate) -> FinanceSummary {
    let mut summary = FinanceSummary::default();
    for record in records
        .iter()
        .filter(|r| r.is_active() && r.entry_date >= from && r.entry_date <= to)
    {
        match record.kind {
            FinanceKind::Income => summary.income_cents += record.amount_cents,
            FinanceKind::Expense => summary.expense_cents += record.amount_cents,
        }
        summary.record_count += 1;
    }
    summary
}

/// Fraction of active tasks that are completed, in `[0.0, 1.0]`.
///
/// Returns `0.0` when there are no active tasks.
pub fn task_completion_rate(tasks: &[TaskRecord]) -> f64 {
    let active: Vec<&TaskRecord> = tasks.iter().filter(|t| t.is_active()).collect();
    if active.is_empty() {
        return 0.0;
    }
    let done = active.iter().filter(|t| t.is_completed).count();
    done as f64 / active.len() as f64
}

#[cfg(test)]
mod tests {
    use super::{finance_summary, monthly_totals, pipeline_breakdown, task_completion_rate};
    use crate::model::finance::{FinanceKind, FinanceRecord};
    use crate::model::school::{PipelinePhase, School};
    use crate::model::task::TaskRecord;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pipeline_breakdown_covers_every_phase() {
        let mut won = School::new("Hilltop Primary");
        won.phase = PipelinePhase::Won;
        let schools = vec![School::new("Riverside Academy"), won];

        let slices = pipeline_breakdown(&schools);
        assert_eq!(slices.len(), PipelinePhase::ALL.len());
        assert_eq!(slices[0].phase, PipelinePhase::NewLead);
        assert_eq!(slices[0].count, 1);
        assert!((slices[0].percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(slices[1].count, 0);
    }

    #[test]
    fn pipeline_breakdown_skips_tombstones() {
        let mut gone = School::new("Closed School");
        gone.soft_delete();
        let slices = pipeline_breakdown(&[gone]);
        assert!(slices.iter().all(|s| s.count == 0 && s.percent == 0.0));
    }

    #[test]
    fn monthly_totals_bucket_by_calendar_month() {
        let records = vec![
            FinanceRecord::new(FinanceKind::Income, "tuition", 10_000, date(2025, 1, 10)),
            FinanceRecord::new(FinanceKind::Expense, "materials", 2_500, date(2025, 1, 20)),
            FinanceRecord::new(FinanceKind::Income, "tuition", 5_000, date(2025, 3, 1)),
        ];

        let totals = monthly_totals(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!((totals[0].year, totals[0].month), (2025, 1));
        assert_eq!(totals[0].income_cents, 10_000);
        assert_eq!(totals[0].expense_cents, 2_500);
        assert_eq!(totals[0].net_cents(), 7_500);
        assert_eq!((totals[1].year, totals[1].month), (2025, 3));
    }

    #[test]
    fn finance_summary_range_is_inclusive() {
        let records = vec![
            FinanceRecord::new(FinanceKind::Income, "tuition", 1_000, date(2025, 2, 1)),
            FinanceRecord::new(FinanceKind::Expense, "travel", 300, date(2025, 2, 28)),
            FinanceRecord::new(FinanceKind::Income, "tuition", 9_999, date(2025, 3, 1)),
        ];

        let summary = finance_summary(&records, date(2025, 2, 1), date(2025, 2, 28));
        assert_eq!(summary.income_cents, 1_000);
        assert_eq!(summary.expense_cents, 300);
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.net_cents(), 700);
    }

    #[test]
    fn completion_rate_ignores_deleted_tasks() {
        let mut done = TaskRecord::new("send invoice", date(2025, 4, 1));
        done.complete();
        let mut deleted = TaskRecord::new("old task", date(2025, 4, 2));
        deleted.soft_delete();
        let tasks = vec![done, TaskRecord::new("call back", date(2025, 4, 3)), deleted];

        assert!((task_completion_rate(&tasks) - 0.5).abs() < f64::EPSILON);
        assert_eq!(task_completion_rate(&[]), 0.0);
    }
}
