//! School repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `schools` table.
//! - Own pipeline phase reassignment semantics.
//!
//! # Invariants
//! - Write paths must call `School::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - List ordering is deterministic: `updated_at DESC, uuid ASC`.

use crate::model::school::{PipelinePhase, School, SchoolId};
use crate::repo::{
    bool_to_int, ensure_schema_ready, parse_bool_column, parse_uuid_column, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const SCHOOL_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    contact_name,
    contact_email,
    contact_phone,
    phase,
    notes,
    is_deleted
FROM schools";

const SCHOOL_COLUMNS: &[&str] = &[
    "uuid",
    "name",
    "contact_name",
    "contact_email",
    "contact_phone",
    "phase",
    "notes",
    "updated_at",
    "is_deleted",
];

/// Query options for listing schools.
#[derive(Debug, Clone, Default)]
pub struct SchoolListQuery {
    /// Optional pipeline phase filter.
    pub phase: Option<PipelinePhase>,
    pub include_deleted: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for school CRUD and phase moves.
pub trait SchoolRepository {
    fn create_school(&self, school: &School) -> RepoResult<SchoolId>;
    fn update_school(&self, school: &School) -> RepoResult<()>;
    fn get_school(&self, id: SchoolId, include_deleted: bool) -> RepoResult<Option<School>>;
    fn list_schools(&self, query: &SchoolListQuery) -> RepoResult<Vec<School>>;
    /// Moves one active school to the given pipeline phase.
    fn set_phase(&self, id: SchoolId, phase: PipelinePhase) -> RepoResult<()>;
    fn soft_delete_school(&self, id: SchoolId) -> RepoResult<()>;
}

/// SQLite-backed school repository.
pub struct SqliteSchoolRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSchoolRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "schools", SCHOOL_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl SchoolRepository for SqliteSchoolRepository<'_> {
    fn create_school(&self, school: &School) -> RepoResult<SchoolId> {
        school.validate()?;

        self.conn.execute(
            "INSERT INTO schools (
                uuid,
                name,
                contact_name,
                contact_email,
                contact_phone,
                phase,
                notes,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                school.uuid.to_string(),
                school.name.as_str(),
                school.contact_name.as_deref(),
                school.contact_email.as_deref(),
                school.contact_phone.as_deref(),
                school.phase.as_str(),
                school.notes.as_deref(),
                bool_to_int(school.is_deleted),
            ],
        )?;

        Ok(school.uuid)
    }

    fn update_school(&self, school: &School) -> RepoResult<()> {
        school.validate()?;

        let changed = self.conn.execute(
            "UPDATE schools
             SET
                name = ?1,
                contact_name = ?2,
                contact_email = ?3,
                contact_phone = ?4,
                phase = ?5,
                notes = ?6,
                is_deleted = ?7,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?8;",
            params![
                school.name.as_str(),
                school.contact_name.as_deref(),
                school.contact_email.as_deref(),
                school.contact_phone.as_deref(),
                school.phase.as_str(),
                school.notes.as_deref(),
                bool_to_int(school.is_deleted),
                school.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(school.uuid));
        }

        Ok(())
    }

    fn get_school(&self, id: SchoolId, include_deleted: bool) -> RepoResult<Option<School>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SCHOOL_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_school_row(row)?));
        }

        Ok(None)
    }

    fn list_schools(&self, query: &SchoolListQuery) -> RepoResult<Vec<School>> {
        let mut sql = format!("{SCHOOL_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        if let Some(phase) = query.phase {
            sql.push_str(" AND phase = ?");
            bind_values.push(Value::Text(phase.as_str().to_string()));
        }

        sql.push_str(" ORDER BY updated_at DESC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut schools = Vec::new();

        while let Some(row) = rows.next()? {
            schools.push(parse_school_row(row)?);
        }

        Ok(schools)
    }

    fn set_phase(&self, id: SchoolId, phase: PipelinePhase) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE schools
             SET
                phase = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2
               AND is_deleted = 0;",
            params![phase.as_str(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn soft_delete_school(&self, id: SchoolId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE schools
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

fn parse_school_row(row: &Row<'_>) -> RepoResult<School> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid_column(&uuid_text, "schools", "uuid")?;

    let phase_text: String = row.get("phase")?;
    let phase = PipelinePhase::parse(&phase_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid phase `{phase_text}` in schools.phase"))
    })?;

    let is_deleted = parse_bool_column(row.get("is_deleted")?, "schools", "is_deleted")?;

    let school = School {
        uuid,
        name: row.get("name")?,
        contact_name: row.get("contact_name")?,
        contact_email: row.get("contact_email")?,
        contact_phone: row.get("contact_phone")?,
        phase,
        notes: row.get("notes")?,
        is_deleted,
    };
    school.validate()?;
    Ok(school)
}
