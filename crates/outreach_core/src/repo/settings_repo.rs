//! Settings repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load and persist the single reminder-settings row.
//!
//! # Invariants
//! - Exactly one settings row exists (seeded by migration 0004).
//! - Saves must pass `ReminderSettings::validate()` first.

use crate::model::settings::ReminderSettings;
use crate::repo::{bool_to_int, ensure_schema_ready, parse_bool_column, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

const SETTINGS_COLUMNS: &[&str] = &[
    "id",
    "notifications_enabled",
    "poll_interval_minutes",
    "task_lookahead_minutes",
    "meeting_lookahead_minutes",
    "task_reminders_enabled",
    "meeting_reminders_enabled",
];

/// Repository interface for reminder settings.
pub trait SettingsRepository {
    fn load(&self) -> RepoResult<ReminderSettings>;
    fn save(&self, settings: &ReminderSettings) -> RepoResult<()>;
}

/// SQLite-backed settings repository.
pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "settings", SETTINGS_COLUMNS)?;
        Ok(Self { conn })
    }
}

fn parse_minutes_column(value: i64, column: &str) -> RepoResult<u32> {
    u32::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid interval value `{value}` in settings.{column}"
        ))
    })
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn load(&self) -> RepoResult<ReminderSettings> {
        let row = self
            .conn
            .query_row(
                "SELECT
                    notifications_enabled,
                    poll_interval_minutes,
                    task_lookahead_minutes,
                    meeting_lookahead_minutes,
                    task_reminders_enabled,
                    meeting_reminders_enabled
                 FROM settings
                 WHERE id = 1;",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, i64>(4)?,
                        row.get::<_, i64>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((notifications, poll, task_win, meeting_win, task_flag, meeting_flag)) = row
        else {
            return Err(RepoError::InvalidData(
                "settings row missing; migration 0004 did not seed it".to_string(),
            ));
        };

        let settings = ReminderSettings {
            notifications_enabled: parse_bool_column(
                notifications,
                "settings",
                "notifications_enabled",
            )?,
            poll_interval_minutes: parse_minutes_column(poll, "poll_interval_minutes")?,
            task_lookahead_minutes: parse_minutes_column(task_win, "task_lookahead_minutes")?,
            meeting_lookahead_minutes: parse_minutes_column(
                meeting_win,
                "meeting_lookahead_minutes",
            )?,
            task_reminders_enabled: parse_bool_column(
                task_flag,
                "settings",
                "task_reminders_enabled",
            )?,
            meeting_reminders_enabled: parse_bool_column(
                meeting_flag,
                "settings",
                "meeting_reminders_enabled",
            )?,
        };
        settings.validate()?;
        Ok(settings)
    }

    fn save(&self, settings: &ReminderSettings) -> RepoResult<()> {
        settings.validate()?;

        self.conn.execute(
            "UPDATE settings
             SET
                notifications_enabled = ?1,
                poll_interval_minutes = ?2,
                task_lookahead_minutes = ?3,
                meeting_lookahead_minutes = ?4,
                task_reminders_enabled = ?5,
                meeting_reminders_enabled = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = 1;",
            params![
                bool_to_int(settings.notifications_enabled),
                settings.poll_interval_minutes,
                settings.task_lookahead_minutes,
                settings.meeting_lookahead_minutes,
                bool_to_int(settings.task_reminders_enabled),
                bool_to_int(settings.meeting_reminders_enabled),
            ],
        )?;

        Ok(())
    }
}
