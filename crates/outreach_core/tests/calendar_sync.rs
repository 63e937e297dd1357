use chrono::{NaiveDate, NaiveTime};
use outreach_core::db::open_db_in_memory;
use outreach_core::repo::mapping_repo::{MappingRepository, SqliteMappingRepository};
use outreach_core::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use outreach_core::sync::calendar_sync::{CalendarSyncError, CalendarSyncService};
use outreach_core::sync::provider_registry::ProviderRegistry;
use outreach_core::sync::provider_spi::ProviderSpi;
use outreach_core::sync::provider_types::{
    ProviderAuthRequest, ProviderAuthResult, ProviderAuthState, ProviderHealth,
    ProviderPullRequest, ProviderPullResult, ProviderPushRequest, ProviderPushResult,
    ProviderResult, ProviderStatus, PushAck, SyncStage,
};
use outreach_core::TaskRecord;
use std::sync::Arc;

struct FakeCalendar {
    fail_push: bool,
}

impl ProviderSpi for FakeCalendar {
    fn provider_id(&self) -> &str {
        "google_calendar"
    }

    fn status(&self) -> ProviderStatus {
        ProviderStatus {
            provider_id: "google_calendar".to_string(),
            health: ProviderHealth::Healthy,
            auth_state: ProviderAuthState::Authenticated,
            last_sync_at_ms: None,
        }
    }

    fn auth(&self, _request: ProviderAuthRequest) -> ProviderResult<ProviderAuthResult> {
        Ok(ProviderAuthResult {
            state: ProviderAuthState::Authenticated,
            granted: true,
            expires_at_ms: None,
        })
    }

    fn pull(&self, _request: ProviderPullRequest) -> ProviderResult<ProviderPullResult> {
        Ok(ProviderPullResult {
            events: vec![],
            next_cursor: None,
            has_more: false,
        })
    }

    fn push(&self, request: ProviderPushRequest) -> ProviderResult<ProviderPushResult> {
        if self.fail_push {
            return Err(outreach_core::sync::provider_types::ProviderErrorEnvelope::new(
                "google_calendar",
                SyncStage::Push,
                "rate_limited",
                "Too many requests.",
                true,
            ));
        }
        let accepted = request
            .events
            .iter()
            .map(|event| PushAck {
                task_uuid: event.task_uuid,
                external_id: format!("gcal-{}", event.title.replace(' ', "-")),
            })
            .collect();
        Ok(ProviderPushResult {
            accepted,
            failed_count: 0,
        })
    }
}

fn registry(fail_push: bool) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry
        .register(Arc::new(FakeCalendar { fail_push }))
        .unwrap();
    registry.select_active("google_calendar").unwrap();
    registry
}

fn meeting(title: &str) -> TaskRecord {
    let mut task = TaskRecord::new(title, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
    task.due_time = NaiveTime::from_hms_opt(10, 0, 0);
    task.is_meeting = true;
    task
}

#[test]
fn push_writes_mappings_for_accepted_meetings() {
    let conn = open_db_in_memory().unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let intro = meeting("intro meeting");
    tasks.create_task(&intro).unwrap();
    tasks
        .create_task(&TaskRecord::new(
            "plain task",
            NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        ))
        .unwrap();

    let registry = registry(false);
    let mappings = SqliteMappingRepository::try_new(&conn).unwrap();
    let service = CalendarSyncService::new(&registry, mappings);

    let open = tasks.list_open().unwrap();
    let report = service.push_meetings(&open).unwrap();
    assert_eq!(report.pushed, 1);
    assert_eq!(report.accepted, 1);
    assert_eq!(report.failed, 0);

    let mappings = SqliteMappingRepository::try_new(&conn).unwrap();
    let stored = mappings
        .get(intro.uuid, "google_calendar")
        .unwrap()
        .unwrap();
    assert_eq!(stored.external_id, "gcal-intro-meeting");
}

#[test]
fn repeated_push_upserts_instead_of_duplicating() {
    let conn = open_db_in_memory().unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();
    tasks.create_task(&meeting("intro meeting")).unwrap();

    let registry = registry(false);
    let service =
        CalendarSyncService::new(&registry, SqliteMappingRepository::try_new(&conn).unwrap());

    let open = tasks.list_open().unwrap();
    service.push_meetings(&open).unwrap();
    service.push_meetings(&open).unwrap();

    let mappings = SqliteMappingRepository::try_new(&conn).unwrap();
    assert_eq!(mappings.list_for_provider("google_calendar").unwrap().len(), 1);
}

#[test]
fn provider_failure_surfaces_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();
    let intro = meeting("intro meeting");
    tasks.create_task(&intro).unwrap();

    let registry = registry(true);
    let service =
        CalendarSyncService::new(&registry, SqliteMappingRepository::try_new(&conn).unwrap());

    let open = tasks.list_open().unwrap();
    let err = service.push_meetings(&open).unwrap_err();
    assert!(matches!(err, CalendarSyncError::Provider(ref e) if e.code == "rate_limited"));

    let mappings = SqliteMappingRepository::try_new(&conn).unwrap();
    assert!(mappings.get(intro.uuid, "google_calendar").unwrap().is_none());
}

#[test]
fn removing_task_mappings_clears_all_providers() {
    let conn = open_db_in_memory().unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();
    let intro = meeting("intro meeting");
    tasks.create_task(&intro).unwrap();

    let registry = registry(false);
    let service =
        CalendarSyncService::new(&registry, SqliteMappingRepository::try_new(&conn).unwrap());
    service.push_meetings(&tasks.list_open().unwrap()).unwrap();

    let mappings = SqliteMappingRepository::try_new(&conn).unwrap();
    mappings.remove_for_task(intro.uuid).unwrap();
    assert!(mappings
        .list_for_provider("google_calendar")
        .unwrap()
        .is_empty());
}
