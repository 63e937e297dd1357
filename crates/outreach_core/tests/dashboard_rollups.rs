use chrono::NaiveDate;
use outreach_core::dashboard::{
    finance_summary, monthly_totals, pipeline_breakdown, task_completion_rate,
};
use outreach_core::db::open_db_in_memory;
use outreach_core::repo::finance_repo::{FinanceListQuery, SqliteFinanceRepository};
use outreach_core::repo::school_repo::{SchoolListQuery, SchoolRepository, SqliteSchoolRepository};
use outreach_core::repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskRepository};
use outreach_core::service::finance_service::FinanceService;
use outreach_core::{PipelinePhase, School, TaskRecord};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn pipeline_breakdown_over_persisted_schools() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchoolRepository::try_new(&conn).unwrap();

    repo.create_school(&School::new("Lead One")).unwrap();
    repo.create_school(&School::new("Lead Two")).unwrap();
    let mut won = School::new("Won School");
    won.phase = PipelinePhase::Won;
    repo.create_school(&won).unwrap();

    let schools = repo.list_schools(&SchoolListQuery::default()).unwrap();
    let slices = pipeline_breakdown(&schools);

    let new_lead = slices
        .iter()
        .find(|s| s.phase == PipelinePhase::NewLead)
        .unwrap();
    assert_eq!(new_lead.count, 2);
    assert!((new_lead.percent - 200.0 / 3.0).abs() < 1e-9);

    let lost = slices
        .iter()
        .find(|s| s.phase == PipelinePhase::Lost)
        .unwrap();
    assert_eq!(lost.count, 0);
    assert_eq!(lost.percent, 0.0);
}

#[test]
fn monthly_totals_over_persisted_ledger() {
    let conn = open_db_in_memory().unwrap();
    let service = FinanceService::new(SqliteFinanceRepository::try_new(&conn).unwrap());

    service
        .record_income("tuition", "200", date(2025, 1, 5), None)
        .unwrap();
    service
        .record_expense("materials", "50", date(2025, 1, 20), None)
        .unwrap();
    service
        .record_income("tuition", "300", date(2025, 2, 5), None)
        .unwrap();

    let records = service.list_records(&FinanceListQuery::default()).unwrap();
    let totals = monthly_totals(&records);

    assert_eq!(totals.len(), 2);
    assert_eq!((totals[0].year, totals[0].month), (2025, 1));
    assert_eq!(totals[0].income_cents, 20_000);
    assert_eq!(totals[0].expense_cents, 5_000);
    assert_eq!(totals[0].net_cents(), 15_000);
    assert_eq!(totals[1].income_cents, 30_000);
}

#[test]
fn finance_summary_matches_range() {
    let conn = open_db_in_memory().unwrap();
    let service = FinanceService::new(SqliteFinanceRepository::try_new(&conn).unwrap());

    service
        .record_income("tuition", "100", date(2025, 1, 31), None)
        .unwrap();
    service
        .record_expense("travel", "40", date(2025, 2, 1), None)
        .unwrap();

    let records = service.list_records(&FinanceListQuery::default()).unwrap();
    let january = finance_summary(&records, date(2025, 1, 1), date(2025, 1, 31));
    assert_eq!(january.income_cents, 10_000);
    assert_eq!(january.expense_cents, 0);
    assert_eq!(january.record_count, 1);
}

#[test]
fn completion_rate_over_persisted_tasks() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let mut done = TaskRecord::new("done", date(2025, 5, 1));
    done.is_completed = true;
    repo.create_task(&done).unwrap();
    repo.create_task(&TaskRecord::new("open one", date(2025, 5, 2)))
        .unwrap();
    repo.create_task(&TaskRecord::new("open two", date(2025, 5, 3)))
        .unwrap();

    let tasks = repo
        .list_tasks(&TaskListQuery {
            include_completed: true,
            ..Default::default()
        })
        .unwrap();
    let rate = task_completion_rate(&tasks);
    assert!((rate - 1.0 / 3.0).abs() < 1e-9);
}
