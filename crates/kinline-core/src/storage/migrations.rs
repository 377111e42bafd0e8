//! Database schema migrations for SQLite stores.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            tracing::warn!("failed to read schema_version: {e}");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Migration v1: one table per record kind, each row a JSON document.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(indoc::indoc! {"
        CREATE TABLE IF NOT EXISTS person (
            handle    TEXT PRIMARY KEY,
            gramps_id TEXT NOT NULL DEFAULT '',
            json_data TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS family (
            handle    TEXT PRIMARY KEY,
            gramps_id TEXT NOT NULL DEFAULT '',
            json_data TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS event (
            handle    TEXT PRIMARY KEY,
            gramps_id TEXT NOT NULL DEFAULT '',
            json_data TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS citation (
            handle    TEXT PRIMARY KEY,
            gramps_id TEXT NOT NULL DEFAULT '',
            json_data TEXT NOT NULL
        );
    "})?;
    set_schema_version(&tx, 1)?;
    tx.commit()
}

/// Migration v2: denormalized event type and sort value for event lookups.
///
/// The event type is backfilled from the stored JSON; sort values are
/// written when records are imported.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(indoc::indoc! {"
        ALTER TABLE event ADD COLUMN event_type TEXT NOT NULL DEFAULT '';
        ALTER TABLE event ADD COLUMN sortval INTEGER NOT NULL DEFAULT 0;
        CREATE INDEX IF NOT EXISTS idx_event_type ON event(event_type);
        CREATE INDEX IF NOT EXISTS idx_person_gramps_id ON person(gramps_id);
        CREATE INDEX IF NOT EXISTS idx_family_gramps_id ON family(gramps_id);
    "})?;
    tx.execute(
        "UPDATE event SET event_type = COALESCE(json_extract(json_data, '$.type'), '')",
        [],
    )?;
    set_schema_version(&tx, 2)?;
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_from_scratch() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), SCHEMA_VERSION);

        let has_event_type: bool = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('event') WHERE name = 'event_type'",
                [],
                |row| row.get::<_, i32>(0),
            )
            .unwrap()
            > 0;
        assert!(has_event_type);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), SCHEMA_VERSION);
    }

    #[test]
    fn test_v2_backfills_event_type() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema_version_table(&conn).unwrap();
        migrate_v1(&conn).unwrap();
        conn.execute(
            "INSERT INTO event (handle, json_data) VALUES ('E1', '{\"handle\":\"E1\",\"type\":\"Burial\"}')",
            [],
        )
        .unwrap();

        migrate(&conn).unwrap();

        let event_type: String = conn
            .query_row("SELECT event_type FROM event WHERE handle = 'E1'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(event_type, "Burial");
    }
}
