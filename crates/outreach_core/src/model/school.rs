//! School (lead) domain model.
//!
//! # Responsibility
//! - Define the pipeline lead record and its phase lifecycle.
//! - Validate contact data before persistence.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another school.
//! - `is_deleted` is the source of truth for tombstone state.
//! - `phase` is always one of the fixed pipeline phases.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Stable identifier for a school lead.
pub type SchoolId = Uuid;

/// Fixed pipeline phase for the lead board.
///
/// Board columns are static; phase reassignment (drag-and-drop in the UI)
/// moves a school between these values without further ceremony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    NewLead,
    Contacted,
    MeetingBooked,
    ProposalSent,
    Won,
    Lost,
}

impl PipelinePhase {
    /// All phases in board order. Used for dashboard slices and parsing.
    pub const ALL: [PipelinePhase; 6] = [
        PipelinePhase::NewLead,
        PipelinePhase::Contacted,
        PipelinePhase::MeetingBooked,
        PipelinePhase::ProposalSent,
        PipelinePhase::Won,
        PipelinePhase::Lost,
    ];

    /// Canonical storage/export string for this phase.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewLead => "new_lead",
            Self::Contacted => "contacted",
            Self::MeetingBooked => "meeting_booked",
            Self::ProposalSent => "proposal_sent",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    /// Parses the canonical storage string back to a phase.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str() == value)
    }
}

/// School validation failure reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchoolValidationError {
    /// Name is empty or whitespace-only.
    EmptyName,
    /// Contact email is present but not a plausible address.
    InvalidEmail(String),
}

impl Display for SchoolValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "school name cannot be empty"),
            Self::InvalidEmail(value) => write!(f, "invalid contact email: `{value}`"),
        }
    }
}

impl Error for SchoolValidationError {}

/// Canonical lead record tracked on the pipeline board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    /// Stable global ID used for linking and auditing.
    pub uuid: SchoolId,
    /// Display name of the school.
    pub name: String,
    /// Primary contact person, when known.
    pub contact_name: Option<String>,
    /// Primary contact email, when known.
    pub contact_email: Option<String>,
    /// Primary contact phone, when known.
    pub contact_phone: Option<String>,
    /// Current pipeline phase.
    pub phase: PipelinePhase,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Soft delete tombstone.
    pub is_deleted: bool,
}

impl School {
    /// Creates a new lead in the `new_lead` phase with a generated ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a lead with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(uuid: SchoolId, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            contact_name: None,
            contact_email: None,
            contact_phone: None,
            phase: PipelinePhase::NewLead,
            notes: None,
            is_deleted: false,
        }
    }

    /// Validates record-level invariants before persistence.
    pub fn validate(&self) -> Result<(), SchoolValidationError> {
        if self.name.trim().is_empty() {
            return Err(SchoolValidationError::EmptyName);
        }
        if let Some(email) = self.contact_email.as_deref() {
            if !EMAIL_RE.is_match(email.trim()) {
                return Err(SchoolValidationError::InvalidEmail(email.to_string()));
            }
        }
        Ok(())
    }

    /// Marks this school as softly deleted (tombstoned).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this school should be considered visible/active.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}
