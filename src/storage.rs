//! Database location, connection setup and schema.

use crate::errors::StoreResult;
use chrono::{SecondsFormat, Utc};
use rusqlite::Connection;
use std::{env, path::Path, path::PathBuf};
use tracing::{debug, info};

const DEFAULT_DB_PATH: &str = "data/work_dashboard.db";

/// Columns added to `reports` after the first schema shipped. Older
/// databases get them appended on open.
const REPORT_ADDITIVE_COLUMNS: [&str; 8] = [
    "tasks",
    "status",
    "last_updated",
    "active_status",
    "cinematography_log",
    "video_editing_log",
    "live_operating_log",
    "script_log",
];

pub fn resolve_db_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DB_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_DB_PATH)
}

pub fn open_db(path: &Path) -> StoreResult<Connection> {
    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> StoreResult<Connection> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Creates missing tables and appends missing report columns. Safe to run
/// on every start.
pub fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reports (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            date               TEXT UNIQUE,
            in_time            TEXT,
            out_time           TEXT,
            tasks              TEXT,
            status             TEXT,
            last_updated       TEXT,
            active_status      TEXT,
            cinematography_log TEXT,
            video_editing_log  TEXT,
            live_operating_log TEXT,
            script_log         TEXT
        );

        CREATE TABLE IF NOT EXISTS projects (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT,
            category    TEXT,
            description TEXT,
            created_at  TEXT
        );

        CREATE TABLE IF NOT EXISTS issues (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT,
            title     TEXT,
            is_solved INTEGER DEFAULT 0,
            solution  TEXT
        );

        CREATE TABLE IF NOT EXISTS resources (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            type  TEXT,
            title TEXT,
            url   TEXT
        );
        "#,
    )?;

    add_missing_report_columns(conn)
}

fn add_missing_report_columns(conn: &Connection) -> StoreResult<()> {
    let existing = table_columns(conn, "reports")?;

    for column in REPORT_ADDITIVE_COLUMNS {
        if existing.iter().any(|name| name == column) {
            continue;
        }
        conn.execute_batch(&format!("ALTER TABLE reports ADD COLUMN {column} TEXT"))?;
        info!("added column reports.{column}");
    }

    debug!("schema up to date");
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> StoreResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2024-01-15T09:00:00.000Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_setup_is_idempotent() {
        let conn = open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();

        let columns = table_columns(&conn, "reports").unwrap();
        assert_eq!(columns.len(), 12);
    }

    #[test]
    fn old_reports_table_gains_new_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE reports (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT UNIQUE,
                in_time TEXT,
                out_time TEXT,
                tasks TEXT,
                status TEXT,
                last_updated TEXT
            );
            INSERT INTO reports (date, tasks, status) VALUES ('2023-12-01', 'Daily Tasks', 'Present');",
        )
        .unwrap();

        ensure_schema(&conn).unwrap();

        let columns = table_columns(&conn, "reports").unwrap();
        for column in REPORT_ADDITIVE_COLUMNS {
            assert!(columns.iter().any(|c| c == column), "missing {column}");
        }

        let status: String = conn
            .query_row("SELECT status FROM reports WHERE date = '2023-12-01'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(status, "Present");
    }

    #[test]
    fn timestamps_are_utc_millis() {
        let ts = timestamp_now();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2024-01-15T09:00:00.000Z".len());
    }
}
