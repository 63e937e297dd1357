//! Library use-case service.
//!
//! # Responsibility
//! - Provide document/resource shelf entry points.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Mutations read the row back so callers always see persisted state.

use crate::model::library::{LibraryItem, LibraryItemId, LibraryShelf};
use crate::repo::library_repo::{LibraryListQuery, LibraryRepository};
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for library use-cases.
#[derive(Debug)]
pub enum LibraryServiceError {
    /// Target item does not exist or is soft-deleted.
    ItemNotFound(LibraryItemId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for LibraryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound(id) => write!(f, "library item not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent library state: {details}")
            }
        }
    }
}

impl Error for LibraryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for LibraryServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ItemNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for adding a library entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLibraryItemRequest {
    pub title: String,
    pub location: String,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Library service facade over repository implementations.
pub struct LibraryService<R: LibraryRepository> {
    repo: R,
}

impl<R: LibraryRepository> LibraryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one entry to the document shelf.
    pub fn add_document(
        &self,
        request: &NewLibraryItemRequest,
    ) -> Result<LibraryItem, LibraryServiceError> {
        self.add(LibraryShelf::Document, request)
    }

    /// Adds one entry to the resource shelf.
    pub fn add_resource(
        &self,
        request: &NewLibraryItemRequest,
    ) -> Result<LibraryItem, LibraryServiceError> {
        self.add(LibraryShelf::Resource, request)
    }

    /// Updates an existing item by stable ID.
    pub fn update_item(&self, item: &LibraryItem) -> Result<LibraryItem, LibraryServiceError> {
        self.repo.update_item(item)?;
        self.repo
            .get_item(item.uuid, true)?
            .ok_or(LibraryServiceError::InconsistentState(
                "updated item not found in read-back",
            ))
    }

    /// Gets one item by ID with optional deleted-row visibility.
    pub fn get_item(
        &self,
        id: LibraryItemId,
        include_deleted: bool,
    ) -> RepoResult<Option<LibraryItem>> {
        self.repo.get_item(id, include_deleted)
    }

    /// Lists one shelf, optionally narrowed to a category.
    pub fn list_shelf(
        &self,
        shelf: LibraryShelf,
        category: Option<String>,
    ) -> RepoResult<Vec<LibraryItem>> {
        self.repo.list_items(&LibraryListQuery {
            shelf: Some(shelf),
            category,
            include_deleted: false,
        })
    }

    /// Soft-deletes an item by ID.
    pub fn remove_item(&self, id: LibraryItemId) -> RepoResult<()> {
        self.repo.soft_delete_item(id)
    }

    fn add(
        &self,
        shelf: LibraryShelf,
        request: &NewLibraryItemRequest,
    ) -> Result<LibraryItem, LibraryServiceError> {
        let mut item = LibraryItem::new(shelf, request.title.clone(), request.location.clone());
        item.category = request.category.clone();
        item.notes = request.notes.clone();

        let id = self.repo.create_item(&item)?;
        self.repo
            .get_item(id, false)?
            .ok_or(LibraryServiceError::InconsistentState(
                "created item not found in read-back",
            ))
    }
}
