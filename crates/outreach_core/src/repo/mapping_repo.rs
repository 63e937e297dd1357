//! Calendar-sync mapping repository.
//!
//! # Responsibility
//! - Persist which external calendar event mirrors which task, per provider.
//!
//! # Invariants
//! - `(task_uuid, provider_id)` is unique; re-push replaces the mapping.

use crate::model::task::TaskId;
use crate::repo::{ensure_schema_ready, parse_uuid_column, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

const MAPPING_COLUMNS: &[&str] = &["task_uuid", "provider_id", "external_id", "pushed_at"];

/// One task-to-external-event link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalMapping {
    pub task_uuid: TaskId,
    pub provider_id: String,
    pub external_id: String,
    /// Last push timestamp in epoch milliseconds.
    pub pushed_at: i64,
}

/// Repository interface for calendar-sync mappings.
pub trait MappingRepository {
    /// Inserts or replaces the mapping for `(task, provider)`.
    fn upsert(&self, task: TaskId, provider_id: &str, external_id: &str) -> RepoResult<()>;
    fn get(&self, task: TaskId, provider_id: &str) -> RepoResult<Option<ExternalMapping>>;
    /// Removes all mappings held for one task (across providers).
    fn remove_for_task(&self, task: TaskId) -> RepoResult<()>;
    fn list_for_provider(&self, provider_id: &str) -> RepoResult<Vec<ExternalMapping>>;
}

/// SQLite-backed mapping repository.
pub struct SqliteMappingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMappingRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "external_mappings", MAPPING_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl MappingRepository for SqliteMappingRepository<'_> {
    fn upsert(&self, task: TaskId, provider_id: &str, external_id: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO external_mappings (task_uuid, provider_id, external_id, pushed_at)
             VALUES (?1, ?2, ?3, (strftime('%s', 'now') * 1000))
             ON CONFLICT (task_uuid, provider_id) DO UPDATE SET
                external_id = excluded.external_id,
                pushed_at = excluded.pushed_at;",
            params![task.to_string(), provider_id, external_id],
        )?;
        Ok(())
    }

    fn get(&self, task: TaskId, provider_id: &str) -> RepoResult<Option<ExternalMapping>> {
        let row = self
            .conn
            .query_row(
                "SELECT task_uuid, provider_id, external_id, pushed_at
                 FROM external_mappings
                 WHERE task_uuid = ?1 AND provider_id = ?2;",
                params![task.to_string(), provider_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((task_text, provider, external, pushed_at)) => Ok(Some(ExternalMapping {
                task_uuid: parse_uuid_column(&task_text, "external_mappings", "task_uuid")?,
                provider_id: provider,
                external_id: external,
                pushed_at,
            })),
            None => Ok(None),
        }
    }

    fn remove_for_task(&self, task: TaskId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM external_mappings WHERE task_uuid = ?1;",
            [task.to_string()],
        )?;
        Ok(())
    }

    fn list_for_provider(&self, provider_id: &str) -> RepoResult<Vec<ExternalMapping>> {
        let mut stmt = self.conn.prepare(
            "SELECT task_uuid, provider_id, external_id, pushed_at
             FROM external_mappings
             WHERE provider_id = ?1
             ORDER BY task_uuid ASC;",
        )?;

        let mut rows = stmt.query([provider_id])?;
        let mut mappings = Vec::new();
        while let Some(row) = rows.next()? {
            let task_text: String = row.get(0)?;
            mappings.push(ExternalMapping {
                task_uuid: parse_uuid_column(&task_text, "external_mappings", "task_uuid")?,
                provider_id: row.get(1)?,
                external_id: row.get(2)?,
                pushed_at: row.get(3)?,
            });
        }

        Ok(mappings)
    }
}
