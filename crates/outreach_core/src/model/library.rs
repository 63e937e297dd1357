//! Document/resource library domain model.
//!
//! # Responsibility
//! - Define the shared record for the document and resource shelves.
//!
//! # Invariants
//! - `shelf` decides which library screen renders the item.
//! - `location` always points at something (URL or file path).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a library item.
pub type LibraryItemId = Uuid;

/// Which library a stored item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryShelf {
    /// Business documents (contracts, proposals, invoices).
    Document,
    /// Teaching/reference resources shared with schools.
    Resource,
}

impl LibraryShelf {
    /// Canonical storage/export string for this shelf.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Resource => "resource",
        }
    }

    /// Parses the canonical storage string back to a shelf.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "document" => Some(Self::Document),
            "resource" => Some(Self::Resource),
            _ => None,
        }
    }
}

/// Library validation failure reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Location is empty or whitespace-only.
    EmptyLocation,
}

impl Display for LibraryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "library item title cannot be empty"),
            Self::EmptyLocation => write!(f, "library item location cannot be empty"),
        }
    }
}

impl Error for LibraryValidationError {}

/// One entry on a library shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryItem {
    /// Stable global ID.
    pub uuid: LibraryItemId,
    /// Document or resource shelf.
    pub shelf: LibraryShelf,
    /// Display title.
    pub title: String,
    /// Optional grouping category.
    pub category: Option<String>,
    /// URL or file path of the stored item.
    pub location: String,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Soft delete tombstone.
    pub is_deleted: bool,
}

impl LibraryItem {
    /// Creates a new library entry with a generated stable ID.
    pub fn new(
        shelf: LibraryShelf,
        title: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), shelf, title, location)
    }

    /// Creates a library entry with a caller-provided stable ID.
    pub fn with_id(
        uuid: LibraryItemId,
        shelf: LibraryShelf,
        title: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            shelf,
            title: title.into(),
            category: None,
            location: location.into(),
            notes: None,
            is_deleted: false,
        }
    }

    /// Validates record-level invariants before persistence.
    pub fn validate(&self) -> Result<(), LibraryValidationError> {
        if self.title.trim().is_empty() {
            return Err(LibraryValidationError::EmptyTitle);
        }
        if self.location.trim().is_empty() {
            return Err(LibraryValidationError::EmptyLocation);
        }
        Ok(())
    }

    /// Marks this item as softly deleted (tombstoned).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Returns whether this item should be considered visible/active.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

#[cfg(test)]
mod tests {
    use super::{LibraryItem, LibraryShelf, LibraryValidationError};

    #[test]
    fn validate_requires_title_and_location() {
        let missing_title = LibraryItem::new(LibraryShelf::Document, " ", "docs/contract.pdf");
        assert_eq!(
            missing_title.validate(),
            Err(LibraryValidationError::EmptyTitle)
        );

        let missing_location = LibraryItem::new(LibraryShelf::Resource, "Phonics pack", "");
        assert_eq!(
            missing_location.validate(),
            Err(LibraryValidationError::EmptyLocation)
        );
    }

    #[test]
    fn shelf_strings_round_trip() {
        assert_eq!(
            LibraryShelf::parse("document"),
            Some(LibraryShelf::Document)
        );
        assert_eq!(
            LibraryShelf::parse("resource"),
            Some(LibraryShelf::Resource)
        );
        assert_eq!(LibraryShelf::parse("shelfless"), None);
    }
}
