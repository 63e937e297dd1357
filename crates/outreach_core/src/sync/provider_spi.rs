//! Calendar provider SPI.
//!
//! # Responsibility
//! - Define the trait every calendar provider adapter implements.
//!
//! # Invariants
//! - Adapters are synchronous and infallible only through the
//!   [`ProviderErrorEnvelope`] channel; they never panic on remote
//!   failures.
//!
//! [`ProviderErrorEnvelope`]: crate::sync::provider_types::ProviderErrorEnvelope

use crate::sync::provider_types::{
    ProviderAuthRequest, ProviderAuthResult, ProviderPullRequest, ProviderPullResult,
    ProviderPushRequest, ProviderPushResult, ProviderResult, ProviderStatus,
};

/// Adapter boundary for one external calendar backend.
///
/// Implementations wrap a vendor API (Google Calendar being the first
/// target) behind uniform auth/pull/push operations so the sync layer
/// stays vendor-agnostic.
pub trait ProviderSpi: Send + Sync {
    /// Stable registry ID: lowercase ASCII, digits, `_` and `-` only.
    fn provider_id(&self) -> &str;

    /// Current health and auth snapshot.
    fn status(&self) -> ProviderStatus;

    /// Acquires or refreshes credentials.
    fn auth(&self, request: ProviderAuthRequest) -> ProviderResult<ProviderAuthResult>;

    /// Fetches a page of remote events.
    fn pull(&self, request: ProviderPullRequest) -> ProviderResult<ProviderPullResult>;

    /// Creates or updates remote events for local tasks.
    fn push(&self, request: ProviderPushRequest) -> ProviderResult<ProviderPushResult>;
}
