//! Reminder settings use-case service.
//!
//! # Responsibility
//! - Load/save the single settings row with validation.
//!
//! # Invariants
//! - Saved settings always pass `ReminderSettings::validate()`.

use crate::model::settings::ReminderSettings;
use crate::repo::settings_repo::SettingsRepository;
use crate::repo::RepoResult;

/// Settings service facade over repository implementations.
pub struct SettingsService<R: SettingsRepository> {
    repo: R,
}

impl<R: SettingsRepository> SettingsService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads current reminder settings.
    pub fn get(&self) -> RepoResult<ReminderSettings> {
        self.repo.load()
    }

    /// Persists new settings and returns the stored state.
    pub fn update(&self, settings: &ReminderSettings) -> RepoResult<ReminderSettings> {
        self.repo.save(settings)?;
        self.repo.load()
    }
}
