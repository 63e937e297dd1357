//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `tasks` table.
//! - Feed the reminder engine with open tasks.
//!
//! # Invariants
//! - Write paths must call `TaskRecord::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - List ordering is deterministic: due date, then effective time, then uuid.

use crate::model::school::SchoolId;
use crate::model::task::{TaskId, TaskRecord};
use crate::repo::{
    bool_to_int, date_to_db, ensure_schema_ready, parse_bool_column, parse_date_column,
    parse_time_column, parse_uuid_column, time_to_db, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    school_uuid,
    title,
    due_date,
    due_time,
    is_meeting,
    is_completed,
    is_deleted
FROM tasks";

const TASK_COLUMNS: &[&str] = &[
    "uuid",
    "school_uuid",
    "title",
    "due_date",
    "due_time",
    "is_meeting",
    "is_completed",
    "updated_at",
    "is_deleted",
];

/// Deterministic task ordering: date first, the 09:00 default standing in
/// for missing times, uuid as final tie-break.
const TASK_ORDER_SQL: &str = " ORDER BY due_date ASC, IFNULL(due_time, '09:00') ASC, uuid ASC";

/// Query options for listing tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskListQuery {
    /// Optional owning-school filter.
    pub school: Option<SchoolId>,
    /// Restrict to meetings only.
    pub meetings_only: bool,
    pub include_completed: bool,
    pub include_deleted: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    fn create_task(&self, task: &TaskRecord) -> RepoResult<TaskId>;
    fn update_task(&self, task: &TaskRecord) -> RepoResult<()>;
    fn get_task(&self, id: TaskId, include_deleted: bool) -> RepoResult<Option<TaskRecord>>;
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<TaskRecord>>;
    /// All incomplete, active tasks. Input set for reminder computation.
    fn list_open(&self) -> RepoResult<Vec<TaskRecord>>;
    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<()>;
    fn soft_delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "tasks", TASK_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &TaskRecord) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                school_uuid,
                title,
                due_date,
                due_time,
                is_meeting,
                is_completed,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                task.uuid.to_string(),
                task.school_uuid.map(|id| id.to_string()),
                task.title.as_str(),
                date_to_db(task.due_date),
                task.due_time.map(time_to_db),
                bool_to_int(task.is_meeting),
                bool_to_int(task.is_completed),
                bool_to_int(task.is_deleted),
            ],
        )?;

        Ok(task.uuid)
    }

    fn update_task(&self, task: &TaskRecord) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                school_uuid = ?1,
                title = ?2,
                due_date = ?3,
                due_time = ?4,
                is_meeting = ?5,
                is_completed = ?6,
                is_deleted = ?7,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?8;",
            params![
                task.school_uuid.map(|id| id.to_string()),
                task.title.as_str(),
                date_to_db(task.due_date),
                task.due_time.map(time_to_db),
                bool_to_int(task.is_meeting),
                bool_to_int(task.is_completed),
                bool_to_int(task.is_deleted),
                task.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.uuid));
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId, include_deleted: bool) -> RepoResult<Option<TaskRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<TaskRecord>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        if !query.include_completed {
            sql.push_str(" AND is_completed = 0");
        }

        if query.meetings_only {
            sql.push_str(" AND is_meeting = 1");
        }

        if let Some(school) = query.school {
            sql.push_str(" AND school_uuid = ?");
            bind_values.push(Value::Text(school.to_string()));
        }

        sql.push_str(TASK_ORDER_SQL);

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
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn list_open(&self) -> RepoResult<Vec<TaskRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE is_completed = 0
               AND is_deleted = 0{TASK_ORDER_SQL};"
        ))?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                is_completed = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2
               AND is_deleted = 0;",
            params![bool_to_int(completed), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn soft_delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
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

fn parse_task_row(row: &Row<'_>) -> RepoResult<TaskRecord> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid_column(&uuid_text, "tasks", "uuid")?;

    let school_uuid = match row.get::<_, Option<String>>("school_uuid")? {
        Some(value) => Some(parse_uuid_column(&value, "tasks", "school_uuid")?),
        None => None,
    };

    let due_date_text: String = row.get("due_date")?;
    let due_date = parse_date_column(&due_date_text, "tasks", "due_date")?;

    let due_time = match row.get::<_, Option<String>>("due_time")? {
        Some(value) => Some(parse_time_column(&value, "tasks", "due_time")?),
        None => None,
    };

    let task = TaskRecord {
        uuid,
        school_uuid,
        title: row.get("title")?,
        due_date,
        due_time,
        is_meeting: parse_bool_column(row.get("is_meeting")?, "tasks", "is_meeting")?,
        is_completed: parse_bool_column(row.get("is_completed")?, "tasks", "is_completed")?,
        is_deleted: parse_bool_column(row.get("is_deleted")?, "tasks", "is_deleted")?,
    };
    task.validate()?;
    Ok(task)
}
