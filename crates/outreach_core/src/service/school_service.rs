//! School (lead) use-case service.
//!
//! # Responsibility
//! - Provide pipeline board entry points: create, edit, move, archive.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Mutations read the row back so callers always see persisted state.

use crate::model::school::{PipelinePhase, School, SchoolId};
use crate::repo::school_repo::{SchoolListQuery, SchoolRepository};
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for school use-cases.
#[derive(Debug)]
pub enum SchoolServiceError {
    /// Target school does not exist or is soft-deleted.
    SchoolNotFound(SchoolId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for SchoolServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SchoolNotFound(id) => write!(f, "school not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent school state: {details}"),
        }
    }
}

impl Error for SchoolServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SchoolServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::SchoolNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for creating a lead with contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSchoolRequest {
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
}

/// Use-case service wrapper for the pipeline board.
pub struct SchoolService<R: SchoolRepository> {
    repo: R,
}

impl<R: SchoolRepository> SchoolService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a lead in the `new_lead` phase and returns persisted state.
    pub fn create_school(&self, request: &NewSchoolRequest) -> Result<School, SchoolServiceError> {
        let mut school = School::new(request.name.clone());
        school.contact_name = request.contact_name.clone();
        school.contact_email = request.contact_email.clone();
        school.contact_phone = request.contact_phone.clone();
        school.notes = request.notes.clone();

        let id = self.repo.create_school(&school)?;
        self.repo
            .get_school(id, false)?
            .ok_or(SchoolServiceError::InconsistentState(
                "created school not found in read-back",
            ))
    }

    /// Updates an existing school by stable ID.
    pub fn update_school(&self, school: &School) -> Result<School, SchoolServiceError> {
        self.repo.update_school(school)?;
        self.repo
            .get_school(school.uuid, true)?
            .ok_or(SchoolServiceError::InconsistentState(
                "updated school not found in read-back",
            ))
    }

    /// Moves one school to another pipeline phase (board drag-and-drop).
    pub fn move_to_phase(
        &self,
        id: SchoolId,
        phase: PipelinePhase,
    ) -> Result<School, SchoolServiceError> {
        self.repo.set_phase(id, phase)?;
        self.repo
            .get_school(id, false)?
            .ok_or(SchoolServiceError::InconsistentState(
                "school missing after phase move",
            ))
    }

    /// Gets one school by ID with optional deleted-row visibility.
    pub fn get_school(&self, id: SchoolId, include_deleted: bool) -> RepoResult<Option<School>> {
        self.repo.get_school(id, include_deleted)
    }

    /// Lists schools using filter and pagination options.
    pub fn list_schools(&self, query: &SchoolListQuery) -> RepoResult<Vec<School>> {
        self.repo.list_schools(query)
    }

    /// Soft-deletes a school by ID.
    pub fn soft_delete_school(&self, id: SchoolId) -> RepoResult<()> {
        self.repo.soft_delete_school(id)
    }
}
