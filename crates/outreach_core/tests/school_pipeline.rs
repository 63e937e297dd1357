use outreach_core::db::open_db_in_memory;
use outreach_core::repo::school_repo::{SchoolListQuery, SchoolRepository, SqliteSchoolRepository};
use outreach_core::service::school_service::{NewSchoolRequest, SchoolService, SchoolServiceError};
use outreach_core::{PipelinePhase, School, RepoError};
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchoolRepository::try_new(&conn).unwrap();

    let mut school = School::new("Riverside Academy");
    school.contact_email = Some("admin@riverside.edu".to_string());
    let id = repo.create_school(&school).unwrap();

    let loaded = repo.get_school(id, false).unwrap().unwrap();
    assert_eq!(loaded.uuid, school.uuid);
    assert_eq!(loaded.name, "Riverside Academy");
    assert_eq!(loaded.phase, PipelinePhase::NewLead);
    assert_eq!(loaded.contact_email.as_deref(), Some("admin@riverside.edu"));
    assert!(!loaded.is_deleted);
}

#[test]
fn create_rejects_invalid_email() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchoolRepository::try_new(&conn).unwrap();

    let mut school = School::new("Riverside Academy");
    school.contact_email = Some("not-an-email".to_string());

    let err = repo.create_school(&school).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn phase_move_persists_and_reads_back() {
    let conn = open_db_in_memory().unwrap();
    let service = SchoolService::new(SqliteSchoolRepository::try_new(&conn).unwrap());

    let school = service
        .create_school(&NewSchoolRequest {
            name: "Hilltop Primary".to_string(),
            ..Default::default()
        })
        .unwrap();

    let moved = service
        .move_to_phase(school.uuid, PipelinePhase::MeetingBooked)
        .unwrap();
    assert_eq!(moved.phase, PipelinePhase::MeetingBooked);

    let reloaded = service.get_school(school.uuid, false).unwrap().unwrap();
    assert_eq!(reloaded.phase, PipelinePhase::MeetingBooked);
}

#[test]
fn phase_move_on_missing_school_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = SchoolService::new(SqliteSchoolRepository::try_new(&conn).unwrap());

    let err = service
        .move_to_phase(Uuid::new_v4(), PipelinePhase::Won)
        .unwrap_err();
    assert!(matches!(err, SchoolServiceError::SchoolNotFound(_)));
}

#[test]
fn list_filters_by_phase_and_hides_tombstones() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchoolRepository::try_new(&conn).unwrap();

    let lead = School::new("Lead School");
    repo.create_school(&lead).unwrap();

    let mut won = School::new("Won School");
    won.phase = PipelinePhase::Won;
    repo.create_school(&won).unwrap();

    let deleted = School::new("Deleted School");
    repo.create_school(&deleted).unwrap();
    repo.soft_delete_school(deleted.uuid).unwrap();

    let all = repo.list_schools(&SchoolListQuery::default()).unwrap();
    assert_eq!(all.len(), 2);

    let won_only = repo
        .list_schools(&SchoolListQuery {
            phase: Some(PipelinePhase::Won),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(won_only.len(), 1);
    assert_eq!(won_only[0].name, "Won School");

    let with_deleted = repo
        .list_schools(&SchoolListQuery {
            include_deleted: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(with_deleted.len(), 3);
}

#[test]
fn soft_deleted_school_is_hidden_but_recoverable_via_flag() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchoolRepository::try_new(&conn).unwrap();

    let school = School::new("Gone School");
    repo.create_school(&school).unwrap();
    repo.soft_delete_school(school.uuid).unwrap();

    assert!(repo.get_school(school.uuid, false).unwrap().is_none());
    let tombstone = repo.get_school(school.uuid, true).unwrap().unwrap();
    assert!(tombstone.is_deleted);
}

#[test]
fn soft_delete_missing_school_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchoolRepository::try_new(&conn).unwrap();

    let err = repo.soft_delete_school(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}
