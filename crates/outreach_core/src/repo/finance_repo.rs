//! Finance ledger repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `finance_records` table.
//!
//! # Invariants
//! - Write paths must call `FinanceRecord::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - List ordering is deterministic: `entry_date DESC, uuid ASC`.

use crate::model::finance::{FinanceId, FinanceKind, FinanceRecord};
use crate::repo::{
    bool_to_int, date_to_db, ensure_schema_ready, parse_bool_column, parse_date_column,
    parse_uuid_column, RepoError, RepoResult,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const FINANCE_SELECT_SQL: &str = "SELECT
    uuid,
    kind,
    category,
    amount_cents,
    entry_date,
    description,
    is_deleted
FROM finance_records";

const FINANCE_COLUMNS: &[&str] = &[
    "uuid",
    "kind",
    "category",
    "amount_cents",
    "entry_date",
    "description",
    "updated_at",
    "is_deleted",
];

/// Query options for listing finance records.
#[derive(Debug, Clone, Default)]
pub struct FinanceListQuery {
    /// Optional income/expense filter.
    pub kind: Option<FinanceKind>,
    /// Optional exact category filter (case-sensitive, as stored).
    pub category: Option<String>,
    /// Inclusive lower bound on `entry_date`.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on `entry_date`.
    pub to: Option<NaiveDate>,
    pub include_deleted: bool,
}

/// Repository interface for finance ledger operations.
pub trait FinanceRepository {
    fn create_record(&self, record: &FinanceRecord) -> RepoResult<FinanceId>;
    fn update_record(&self, record: &FinanceRecord) -> RepoResult<()>;
    fn get_record(&self, id: FinanceId, include_deleted: bool)
        -> RepoResult<Option<FinanceRecord>>;
    fn list_records(&self, query: &FinanceListQuery) -> RepoResult<Vec<FinanceRecord>>;
    fn soft_delete_record(&self, id: FinanceId) -> RepoResult<()>;
}

/// SQLite-backed finance repository.
pub struct SqliteFinanceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFinanceRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "finance_records", FINANCE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl FinanceRepository for SqliteFinanceRepository<'_> {
    fn create_record(&self, record: &FinanceRecord) -> RepoResult<FinanceId> {
        record.validate()?;

        self.conn.execute(
            "INSERT INTO finance_records (
                uuid,
                kind,
                category,
                amount_cents,
                entry_date,
                description,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                record.uuid.to_string(),
                record.kind.as_str(),
                record.category.as_str(),
                record.amount_cents,
                date_to_db(record.entry_date),
                record.description.as_deref(),
                bool_to_int(record.is_deleted),
            ],
        )?;

        Ok(record.uuid)
    }

    fn update_record(&self, record: &FinanceRecord) -> RepoResult<()> {
        record.validate()?;

        let changed = self.conn.execute(
            "UPDATE finance_records
             SET
                kind = ?1,
                category = ?2,
                amount_cents = ?3,
                entry_date = ?4,
                description = ?5,
                is_deleted = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                record.kind.as_str(),
                record.category.as_str(),
                record.amount_cents,
                date_to_db(record.entry_date),
                record.description.as_deref(),
                bool_to_int(record.is_deleted),
                record.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(record.uuid));
        }

        Ok(())
    }

    fn get_record(
        &self,
        id: FinanceId,
        include_deleted: bool,
    ) -> RepoResult<Option<FinanceRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{FINANCE_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_finance_row(row)?));
        }

        Ok(None)
    }

    fn list_records(&self, query: &FinanceListQuery) -> RepoResult<Vec<FinanceRecord>> {
        let mut sql = format!("{FINANCE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        if let Some(kind) = query.kind {
            sql.push_str(" AND kind = ?");
            bind_values.push(Value::Text(kind.as_str().to_string()));
        }

        if let Some(category) = query.category.as_ref() {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.clone()));
        }

        if let Some(from) = query.from {
            sql.push_str(" AND entry_date >= ?");
            bind_values.push(Value::Text(date_to_db(from)));
        }

        if let Some(to) = query.to {
            sql.push_str(" AND entry_date <= ?");
            bind_values.push(Value::Text(date_to_db(to)));
        }

        sql.push_str(" ORDER BY entry_date DESC, uuid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_finance_row(row)?);
        }

        Ok(records)
    }

    fn soft_delete_record(&self, id: FinanceId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE finance_records
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

fn parse_finance_row(row: &Row<'_>) -> RepoResult<FinanceRecord> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid_column(&uuid_text, "finance_records", "uuid")?;

    let kind_text: String = row.get("kind")?;
    let kind = FinanceKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid kind `{kind_text}` in finance_records.kind"
        ))
    })?;

    let entry_date_text: String = row.get("entry_date")?;
    let entry_date = parse_date_column(&entry_date_text, "finance_records", "entry_date")?;

    let record = FinanceRecord {
        uuid,
        kind,
        category: row.get("category")?,
        amount_cents: row.get("amount_cents")?,
        entry_date,
        description: row.get("description")?,
        is_deleted: parse_bool_column(row.get("is_deleted")?, "finance_records", "is_deleted")?,
    };
    record.validate()?;
    Ok(record)
}
