//! In-process provider registry and selection hooks.
//!
//! # Responsibility
//! - Hold registered calendar provider adapters and route active-provider
//!   calls to the current selection.
//!
//! # Invariants
//! - Provider IDs are lowercase ASCII, digits, `_` or `-`, non-empty.
//! - At most one provider is active at a time.

use crate::sync::provider_spi::ProviderSpi;
use crate::sync::provider_types::{
    ProviderAuthRequest, ProviderAuthResult, ProviderErrorEnvelope, ProviderPullRequest,
    ProviderPullResult, ProviderPushRequest, ProviderPushResult, ProviderResult, ProviderStatus,
    SyncStage,
};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Provider registration/selection errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderRegistryError {
    InvalidProviderId(String),
    DuplicateProviderId(String),
    ProviderNotFound(String),
}

impl Display for ProviderRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProviderId(value) => write!(f, "provider id is invalid: {value}"),
            Self::DuplicateProviderId(value) => {
                write!(f, "provider id already registered: {value}")
            }
            Self::ProviderNotFound(value) => write!(f, "provider not found: {value}"),
        }
    }
}

impl Error for ProviderRegistryError {}

/// Runtime provider SPI registry.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn ProviderSpi>>,
    active_provider_id: Option<String>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one provider adapter.
    pub fn register(
        &mut self,
        provider: Arc<dyn ProviderSpi>,
    ) -> Result<(), ProviderRegistryError> {
        let provider_id = provider.provider_id().trim().to_string();
        if !is_valid_provider_id(&provider_id) {
            return Err(ProviderRegistryError::InvalidProviderId(provider_id));
        }
        if self.providers.contains_key(provider_id.as_str()) {
            return Err(ProviderRegistryError::DuplicateProviderId(provider_id));
        }

        self.providers.insert(provider_id, provider);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns sorted provider ids.
    pub fn provider_ids(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Selects one active provider.
    pub fn select_active(&mut self, provider_id: &str) -> Result<(), ProviderRegistryError> {
        let normalized = provider_id.trim();
        if !self.providers.contains_key(normalized) {
            return Err(ProviderRegistryError::ProviderNotFound(
                normalized.to_string(),
            ));
        }
        self.active_provider_id = Some(normalized.to_string());
        Ok(())
    }

    /// Clears active provider selection.
    pub fn clear_active(&mut self) {
        self.active_provider_id = None;
    }

    /// Returns active provider id.
    pub fn active_provider_id(&self) -> Option<&str> {
        self.active_provider_id.as_deref()
    }

    /// Returns one provider by id.
    pub fn get(&self, provider_id: &str) -> Option<Arc<dyn ProviderSpi>> {
        self.providers.get(provider_id.trim()).cloned()
    }

    /// Returns active provider handle.
    pub fn active_provider(&self) -> Option<Arc<dyn ProviderSpi>> {
        let id = self.active_provider_id()?;
        self.get(id)
    }

    /// Returns status for one provider.
    pub fn provider_status(&self, provider_id: &str) -> Option<ProviderStatus> {
        self.get(provider_id).map(|provider| provider.status())
    }

    /// Returns status for current active provider.
    pub fn active_status(&self) -> Option<ProviderStatus> {
        self.active_provider().map(|provider| provider.status())
    }

    /// Executes auth against selected provider.
    pub fn auth_active(&self, request: ProviderAuthRequest) -> ProviderResult<ProviderAuthResult> {
        self.require_active(SyncStage::Auth)?.auth(request)
    }

    /// Executes pull against selected provider.
    pub fn pull_active(&self, request: ProviderPullRequest) -> ProviderResult<ProviderPullResult> {
        self.require_active(SyncStage::Pull)?.pull(request)
    }

    /// Executes push against selected provider.
    pub fn push_active(&self, request: ProviderPushRequest) -> ProviderResult<ProviderPushResult> {
        self.require_active(SyncStage::Push)?.push(request)
    }

    fn require_active(&self, stage: SyncStage) -> ProviderResult<Arc<dyn ProviderSpi>> {
        match self.active_provider() {
            Some(provider) => Ok(provider),
            None => Err(ProviderErrorEnvelope::new(
                "registry",
                stage,
                "provider_not_selected",
                "No active provider selected.",
                false,
            )),
        }
    }
}

fn is_valid_provider_id(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
