use chrono::NaiveDate;
use outreach_core::db::open_db_in_memory;
use outreach_core::repo::finance_repo::{
    FinanceListQuery, FinanceRepository, SqliteFinanceRepository,
};
use outreach_core::service::finance_service::{
    parse_amount_cents, FinanceService, FinanceServiceError,
};
use outreach_core::FinanceKind;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn record_income_and_expense_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = FinanceService::new(SqliteFinanceRepository::try_new(&conn).unwrap());

    let income = service
        .record_income("tuition", "120.00", date(2025, 3, 5), None)
        .unwrap();
    assert_eq!(income.kind, FinanceKind::Income);
    assert_eq!(income.amount_cents, 12_000);

    let expense = service
        .record_expense(
            "materials",
            "4.99",
            date(2025, 3, 6),
            Some("flashcards".to_string()),
        )
        .unwrap();
    assert_eq!(expense.kind, FinanceKind::Expense);
    assert_eq!(expense.amount_cents, 499);
    assert_eq!(expense.description.as_deref(), Some("flashcards"));
}

#[test]
fn amount_parsing_accepts_decimal_forms() {
    assert_eq!(parse_amount_cents("12").unwrap(), 1_200);
    assert_eq!(parse_amount_cents("12.5").unwrap(), 1_250);
    assert_eq!(parse_amount_cents("12.50").unwrap(), 1_250);
    assert_eq!(parse_amount_cents(" 0.05 ").unwrap(), 5);
}

#[test]
fn amount_parsing_rejects_garbage_and_zero() {
    for input in ["", "abc", "-5", "12.345", "12,50", "$5", "0", "0.00"] {
        let err = parse_amount_cents(input).unwrap_err();
        assert!(
            matches!(err, FinanceServiceError::InvalidAmount(_)),
            "`{input}` should be rejected"
        );
    }
}

#[test]
fn amount_parsing_rejects_overflowing_values() {
    // One cent past i64::MAX cents; must be an error, not a wrap or panic.
    let err = parse_amount_cents("92233720368547758.08").unwrap_err();
    assert!(matches!(err, FinanceServiceError::InvalidAmount(_)));
}

#[test]
fn list_filters_by_kind_category_and_date_range() {
    let conn = open_db_in_memory().unwrap();
    let service = FinanceService::new(SqliteFinanceRepository::try_new(&conn).unwrap());

    service
        .record_income("tuition", "100", date(2025, 1, 15), None)
        .unwrap();
    service
        .record_expense("materials", "20", date(2025, 2, 10), None)
        .unwrap();
    service
        .record_expense("travel", "30", date(2025, 3, 20), None)
        .unwrap();

    let expenses = service
        .list_records(&FinanceListQuery {
            kind: Some(FinanceKind::Expense),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(expenses.len(), 2);

    let travel = service
        .list_records(&FinanceListQuery {
            category: Some("travel".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(travel.len(), 1);

    let february = service
        .list_records(&FinanceListQuery {
            from: Some(date(2025, 2, 1)),
            to: Some(date(2025, 2, 28)),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(february.len(), 1);
    assert_eq!(february[0].category, "materials");
}

#[test]
fn soft_deleted_records_are_hidden_from_listings() {
    let conn = open_db_in_memory().unwrap();
    let service = FinanceService::new(SqliteFinanceRepository::try_new(&conn).unwrap());

    let record = service
        .record_expense("materials", "10", date(2025, 4, 1), None)
        .unwrap();
    service.soft_delete_record(record.uuid).unwrap();

    let visible = service.list_records(&FinanceListQuery::default()).unwrap();
    assert!(visible.is_empty());

    let with_deleted = service
        .list_records(&FinanceListQuery {
            include_deleted: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(with_deleted.len(), 1);
    assert!(with_deleted[0].is_deleted);
}
