//! Library repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `library_items` table.
//!
//! # Invariants
//! - Write paths must call `LibraryItem::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - List ordering is deterministic: `updated_at DESC, uuid ASC`.

use crate::model::library::{LibraryItem, LibraryItemId, LibraryShelf};
use crate::repo::{
    bool_to_int, ensure_schema_ready, parse_bool_column, parse_uuid_column, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const LIBRARY_SELECT_SQL: &str = "SELECT
    uuid,
    shelf,
    title,
    category,
    location,
    notes,
    is_deleted
FROM library_items";

const LIBRARY_COLUMNS: &[&str] = &[
    "uuid",
    "shelf",
    "title",
    "category",
    "location",
    "notes",
    "updated_at",
    "is_deleted",
];

/// Query options for listing library items.
#[derive(Debug, Clone, Default)]
pub struct LibraryListQuery {
    /// Optional shelf filter.
    pub shelf: Option<LibraryShelf>,
    /// Optional exact category filter (case-sensitive, as stored).
    pub category: Option<String>,
    pub include_deleted: bool,
}

/// Repository interface for library CRUD operations.
pub trait LibraryRepository {
    fn create_item(&self, item: &LibraryItem) -> RepoResult<LibraryItemId>;
    fn update_item(&self, item: &LibraryItem) -> RepoResult<()>;
    fn get_item(&self, id: LibraryItemId, include_deleted: bool)
        -> RepoResult<Option<LibraryItem>>;
    fn list_items(&self, query: &LibraryListQuery) -> RepoResult<Vec<LibraryItem>>;
    fn soft_delete_item(&self, id: LibraryItemId) -> RepoResult<()>;
}

/// SQLite-backed library repository.
pub struct SqliteLibraryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLibraryRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "library_items", LIBRARY_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl LibraryRepository for SqliteLibraryRepository<'_> {
    fn create_item(&self, item: &LibraryItem) -> RepoResult<LibraryItemId> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO library_items (
                uuid,
                shelf,
                title,
                category,
                location,
                notes,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                item.uuid.to_string(),
                item.shelf.as_str(),
                item.title.as_str(),
                item.category.as_deref(),
                item.location.as_str(),
                item.notes.as_deref(),
                bool_to_int(item.is_deleted),
            ],
        )?;

        Ok(item.uuid)
    }

    fn update_item(&self, item: &LibraryItem) -> RepoResult<()> {
        item.validate()?;

        let changed = self.conn.execute(
            "UPDATE library_items
             SET
                shelf = ?1,
                title = ?2,
                category = ?3,
                location = ?4,
                notes = ?5,
                is_deleted = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                item.shelf.as_str(),
                item.title.as_str(),
                item.category.as_deref(),
                item.location.as_str(),
                item.notes.as_deref(),
                bool_to_int(item.is_deleted),
                item.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(item.uuid));
        }

        Ok(())
    }

    fn get_item(
        &self,
        id: LibraryItemId,
        include_deleted: bool,
    ) -> RepoResult<Option<LibraryItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LIBRARY_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_library_row(row)?));
        }

        Ok(None)
    }

    fn list_items(&self, query: &LibraryListQuery) -> RepoResult<Vec<LibraryItem>> {
        let mut sql = format!("{LIBRARY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        if let Some(shelf) = query.shelf {
            sql.push_str(" AND shelf = ?");
            bind_values.push(Value::Text(shelf.as_str().to_string()));
        }

        if let Some(category) = query.category.as_ref() {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.clone()));
        }

        sql.push_str(" ORDER BY updated_at DESC, uuid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_library_row(row)?);
        }

        Ok(items)
    }

    fn soft_delete_item(&self, id: LibraryItemId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE library_items
             SET
                is_deleted = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_library_row(row: &Row<'_>) -> RepoResult<LibraryItem> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid_column(&uuid_text, "library_items", "uuid")?;

    let shelf_text: String = row.get("shelf")?;
    let shelf = LibraryShelf::parse(&shelf_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid shelf `{shelf_text}` in library_items.shelf"))
    })?;

    let item = LibraryItem {
        uuid,
        shelf,
        title: row.get("title")?,
        category: row.get("category")?,
        location: row.get("location")?,
        notes: row.get("notes")?,
        is_deleted: parse_bool_column(row.get("is_deleted")?, "library_items", "is_deleted")?,
    };
    item.validate()?;
    Ok(item)
}
