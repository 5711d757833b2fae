//! Date-keyed daily reports: the upsert and the read side.

use crate::errors::StoreResult;
use crate::models::{ActiveStatus, Report, ReportSnapshot, SaveOutcome};
use crate::storage::timestamp_now;
use crate::task_log::TaskLog;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

const REPORT_COLUMNS: &str = "id, date, in_time, out_time, tasks, status, last_updated, \
     active_status, cinematography_log, video_editing_log, live_operating_log, script_log";

/// Writes the full snapshot for `snapshot.date`, creating the row on first
/// save. Every column is replaced, so a `None` in the snapshot clears it.
///
/// The write itself is a single conflict-resolving insert on the unique
/// date column; the existence probe only decides the reported outcome and
/// shares the transaction with it.
pub fn save_report(conn: &mut Connection, snapshot: &ReportSnapshot) -> StoreResult<SaveOutcome> {
    let last_updated = timestamp_now();
    let tx = conn.transaction()?;

    let existed = tx
        .prepare("SELECT 1 FROM reports WHERE date = ?1")?
        .exists([&snapshot.date])?;

    let id: i64 = tx.query_row(
        "INSERT INTO reports (date, in_time, out_time, tasks, status, active_status,
                              cinematography_log, video_editing_log, live_operating_log,
                              script_log, last_updated)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
         ON CONFLICT(date) DO UPDATE SET
           in_time = excluded.in_time,
           out_time = excluded.out_time,
           tasks = excluded.tasks,
           status = excluded.status,
           active_status = excluded.active_status,
           cinematography_log = excluded.cinematography_log,
           video_editing_log = excluded.video_editing_log,
           live_operating_log = excluded.live_operating_log,
           script_log = excluded.script_log,
           last_updated = excluded.last_updated
         RETURNING id",
        params![
            snapshot.date,
            snapshot.in_time,
            snapshot.out_time,
            snapshot.tasks,
            snapshot.status_or_default(),
            snapshot.active_status.as_ref().map(ActiveStatus::as_str),
            snapshot.cinematography_log.as_ref().map(TaskLog::as_str),
            snapshot.video_editing_log.as_ref().map(TaskLog::as_str),
            snapshot.live_operating_log.as_ref().map(TaskLog::as_str),
            snapshot.script_log.as_ref().map(TaskLog::as_str),
            last_updated,
        ],
        |row| row.get(0),
    )?;

    tx.commit()?;

    let outcome = if existed {
        SaveOutcome::Updated(id)
    } else {
        SaveOutcome::Created(id)
    };
    info!(date = %snapshot.date, id, "{}", outcome.message());
    Ok(outcome)
}

pub fn get_report(conn: &Connection, date: &str) -> StoreResult<Option<Report>> {
    let report = conn
        .query_row(
            &format!("SELECT {REPORT_COLUMNS} FROM reports WHERE date = ?1"),
            [date],
            map_row,
        )
        .optional()?;
    Ok(report)
}

pub fn list_reports(conn: &Connection) -> StoreResult<Vec<Report>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {REPORT_COLUMNS} FROM reports ORDER BY date DESC"
    ))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_row(row: &Row) -> rusqlite::Result<Report> {
    Ok(Report {
        id: row.get("id")?,
        date: row.get("date")?,
        in_time: row.get("in_time")?,
        out_time: row.get("out_time")?,
        tasks: row.get("tasks")?,
        status: row.get("status")?,
        last_updated: row.get("last_updated")?,
        active_status: row
            .get::<_, Option<String>>("active_status")?
            .map(ActiveStatus::from),
        cinematography_log: task_log(row, "cinematography_log")?,
        video_editing_log: task_log(row, "video_editing_log")?,
        live_operating_log: task_log(row, "live_operating_log")?,
        script_log: task_log(row, "script_log")?,
    })
}

fn task_log(row: &Row, column: &str) -> rusqlite::Result<Option<TaskLog>> {
    Ok(row.get::<_, Option<String>>(column)?.map(TaskLog::classify))
}
