//! Shared data types crossing the calendar provider SPI boundary.
//!
//! # Responsibility
//! - Define the request/result/error shapes every provider adapter
//!   speaks, independent of any concrete vendor API.
//!
//! # Invariants
//! - Provider errors always carry a stable machine `code` plus a
//!   human-readable message.
//! - Event timestamps are epoch milliseconds in UTC.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Sync pipeline stage where a provider call runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Auth,
    Pull,
    Push,
}

impl SyncStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Pull => "pull",
            Self::Push => "push",
        }
    }
}

/// Stable error envelope returned by every provider operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderErrorEnvelope {
    pub provider_id: String,
    pub stage: SyncStage,
    /// Stable machine-readable code, e.g. `provider_not_selected`.
    pub code: String,
    pub message: String,
    /// Whether retrying the same call may succeed.
    pub retryable: bool,
}

impl ProviderErrorEnvelope {
    pub fn new(
        provider_id: impl Into<String>,
        stage: SyncStage,
        code: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            stage,
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }
}

impl Display for ProviderErrorEnvelope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "provider={} stage={} code={} retryable={} message={}",
            self.provider_id,
            self.stage.as_str(),
            self.code,
            self.retryable,
            self.message
        )
    }
}

impl Error for ProviderErrorEnvelope {}

/// Result alias used across the provider SPI.
pub type ProviderResult<T> = Result<T, ProviderErrorEnvelope>;

/// Coarse health signal reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderHealth {
    Healthy,
    Degraded,
    Unavailable,
}

/// Authentication state reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderAuthState {
    Unauthenticated,
    Authenticated,
    Expired,
}

/// Snapshot of one provider's current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub provider_id: String,
    pub health: ProviderHealth,
    pub auth_state: ProviderAuthState,
    pub last_sync_at_ms: Option<i64>,
}

/// Auth request passed to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAuthRequest {
    /// Whether the provider may open an interactive consent flow.
    pub interactive: bool,
    pub scopes: Vec<String>,
}

/// Auth outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAuthResult {
    pub state: ProviderAuthState,
    pub granted: bool,
    pub expires_at_ms: Option<i64>,
}

/// One calendar event as providers exchange it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEventRecord {
    /// Provider-side event identifier.
    pub external_id: String,
    /// Local task this event mirrors, when known.
    pub task_uuid: Option<Uuid>,
    pub title: String,
    pub starts_at_ms: i64,
    pub ends_at_ms: i64,
}

/// Pull request with cursor pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPullRequest {
    pub cursor: Option<String>,
    pub limit: u32,
}

/// One pull page of remote events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPullResult {
    pub events: Vec<CalendarEventRecord>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Push request carrying local events to create or update remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPushRequest {
    pub events: Vec<CalendarEventRecord>,
}

/// Per-event push acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushAck {
    pub task_uuid: Option<Uuid>,
    /// Provider-assigned ID for the created/updated event.
    pub external_id: String,
}

/// Push outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPushResult {
    pub accepted: Vec<PushAck>,
    pub failed_count: u32,
}

#[cfg(test)]
mod tests {
    use super::{ProviderErrorEnvelope, SyncStage};

    #[test]
    fn error_envelope_display_includes_code_and_stage() {
        let err = ProviderErrorEnvelope::new(
            "google_calendar",
            SyncStage::Push,
            "rate_limited",
            "Too many requests.",
            true,
        );
        let rendered = err.to_string();
        assert!(rendered.contains("stage=push"));
        assert!(rendered.contains("code=rate_limited"));
        assert!(rendered.contains("retryable=true"));
    }
}
