use chrono::{NaiveDate, NaiveTime};
use outreach_core::db::open_db_in_memory;
use outreach_core::export::{finance_csv, schools_csv, tasks_csv};
use outreach_core::repo::finance_repo::{FinanceListQuery, SqliteFinanceRepository};
use outreach_core::repo::school_repo::{SchoolListQuery, SchoolRepository, SqliteSchoolRepository};
use outreach_core::repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskRepository};
use outreach_core::service::finance_service::FinanceService;
use outreach_core::{School, TaskRecord};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn schools_export_has_header_and_quoted_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchoolRepository::try_new(&conn).unwrap();

    let mut school = School::new("Hilltop, East Campus");
    school.notes = Some("met at \"spring fair\"".to_string());
    repo.create_school(&school).unwrap();

    let schools = repo.list_schools(&SchoolListQuery::default()).unwrap();
    let doc = schools_csv(&schools);
    let lines: Vec<&str> = doc.lines().collect();

    assert_eq!(
        lines[0],
        "uuid,name,contact_name,contact_email,contact_phone,phase,notes"
    );
    assert!(lines[1].contains("\"Hilltop, East Campus\""));
    assert!(lines[1].contains("\"met at \"\"spring fair\"\"\""));
    assert!(lines[1].contains(",new_lead,"));
}

#[test]
fn tasks_export_follows_listing_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let mut late = TaskRecord::new("later", date(2025, 6, 3));
    late.due_time = NaiveTime::from_hms_opt(10, 0, 0);
    repo.create_task(&late).unwrap();

    let mut early = TaskRecord::new("sooner", date(2025, 6, 2));
    early.due_time = NaiveTime::from_hms_opt(8, 0, 0);
    repo.create_task(&early).unwrap();

    let tasks = repo.list_tasks(&TaskListQuery::default()).unwrap();
    let doc = tasks_csv(&tasks);
    let lines: Vec<&str> = doc.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("sooner"));
    assert!(lines[2].contains("later"));
}

#[test]
fn finance_export_renders_decimal_amounts() {
    let conn = open_db_in_memory().unwrap();
    let service = FinanceService::new(SqliteFinanceRepository::try_new(&conn).unwrap());

    service
        .record_expense("materials", "4.99", date(2025, 5, 2), None)
        .unwrap();

    let records = service.list_records(&FinanceListQuery::default()).unwrap();
    let doc = finance_csv(&records);

    assert!(doc.starts_with("uuid,kind,category,amount,entry_date,description\n"));
    assert!(doc.contains(",expense,materials,4.99,2025-05-02,"));
    assert!(!doc.contains("499"));
}
