//! Push-based calendar synchronization.
//!
//! # Responsibility
//! - Mirror open meeting tasks to the active calendar provider and keep
//!   the local mapping table in step with provider acknowledgements.
//!
//! # Invariants
//! - Only active, incomplete meeting tasks are pushed.
//! - A mapping row is written only for events the provider accepted.

use crate::model::task::TaskRecord;
use crate::repo::mapping_repo::MappingRepository;
use crate::repo::RepoError;
use crate::sync::provider_registry::ProviderRegistry;
use crate::sync::provider_types::{
    CalendarEventRecord, ProviderErrorEnvelope, ProviderPushRequest,
};
use chrono::Duration;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Event length used when a meeting has no explicit end.
const DEFAULT_MEETING_MINUTES: i64 = 60;

/// Calendar sync failures.
#[derive(Debug)]
pub enum CalendarSyncError {
    /// The active provider rejected the call.
    Provider(ProviderErrorEnvelope),
    /// Local persistence failed.
    Repo(RepoError),
}

impl Display for CalendarSyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(envelope) => write!(f, "calendar provider failed: {envelope}"),
            Self::Repo(err) => write!(f, "mapping persistence failed: {err}"),
        }
    }
}

impl Error for CalendarSyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Provider(envelope) => Some(envelope),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ProviderErrorEnvelope> for CalendarSyncError {
    fn from(value: ProviderErrorEnvelope) -> Self {
        Self::Provider(value)
    }
}

impl From<RepoError> for CalendarSyncError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Outcome counters for one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Meeting tasks offered to the provider.
    pub pushed: usize,
    /// Events the provider accepted and mapped locally.
    pub accepted: usize,
    /// Events the provider rejected.
    pub failed: usize,
}

/// Pushes open meetings to the active provider and records mappings.
pub struct CalendarSyncService<'a, M: MappingRepository> {
    registry: &'a ProviderRegistry,
    mappings: M,
}

impl<'a, M: MappingRepository> CalendarSyncService<'a, M> {
    pub fn new(registry: &'a ProviderRegistry, mappings: M) -> Self {
        Self { registry, mappings }
    }

    /// Pushes every open meeting in `tasks` to the active provider.
    ///
    /// Tasks that are completed, tombstoned, or not meetings are skipped
    /// before the provider call.
    pub fn push_meetings(&self, tasks: &[TaskRecord]) -> Result<SyncReport, CalendarSyncError> {
        let events: Vec<CalendarEventRecord> = tasks
            .iter()
            .filter(|t| t.is_active() && !t.is_completed && t.is_meeting)
            .map(event_for_task)
            .collect();

        if events.is_empty() {
            log::info!("event=calendar_push module=sync status=ok pushed=0");
            return Ok(SyncReport::default());
        }

        let pushed = events.len();
        let result = self
            .registry
            .push_active(ProviderPushRequest { events })
            .map_err(|envelope| {
                log::warn!(
                    "event=calendar_push module=sync status=error code={}",
                    envelope.code
                );
                envelope
            })?;

        let provider_id = self
            .registry
            .active_provider_id()
            .unwrap_or("unknown")
            .to_string();
        for ack in &result.accepted {
            if let Some(task_uuid) = ack.task_uuid {
                self.mappings
                    .upsert(task_uuid, &provider_id, &ack.external_id)?;
            }
        }

        let report = SyncReport {
            pushed,
            accepted: result.accepted.len(),
            failed: result.failed_count as usize,
        };
        log::info!(
            "event=calendar_push module=sync status=ok pushed={} accepted={} failed={}",
            report.pushed,
            report.accepted,
            report.failed
        );
        Ok(report)
    }
}

fn event_for_task(task: &TaskRecord) -> CalendarEventRecord {
    let starts = task.due_at();
    let ends = starts + Duration::minutes(DEFAULT_MEETING_MINUTES);
    CalendarEventRecord {
        external_id: String::new(),
        task_uuid: Some(task.uuid),
        title: task.title.clone(),
        starts_at_ms: starts.and_utc().timestamp_millis(),
        ends_at_ms: ends.and_utc().timestamp_millis(),
    }
}
