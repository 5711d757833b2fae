use crate::errors::StoreResult;
use crate::models::{Issue, NewIssue};
use rusqlite::{params, Connection, Row};
use tracing::{info, warn};

/// Written to `solution` whenever an issue is toggled. Any earlier
/// solution text is replaced.
pub const SOLVED_PLACEHOLDER: &str = "Marked as solved";

pub fn add_issue(conn: &Connection, issue: &NewIssue) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO issues (date, title, is_solved, solution) VALUES (?1, ?2, ?3, ?4)",
        params![issue.date, issue.title, issue.is_solved, issue.solution],
    )?;
    let id = conn.last_insert_rowid();
    info!(id, "issue created");
    Ok(id)
}

/// Flips the solved flag and overwrites the solution with
/// [`SOLVED_PLACEHOLDER`]. Returns the number of rows touched.
pub fn toggle_issue(conn: &Connection, id: i64, solved: bool) -> StoreResult<usize> {
    warn!(id, "toggling issue, previous solution text is replaced");
    update_issue(conn, id, solved, Some(SOLVED_PLACEHOLDER))
}

pub fn update_issue(
    conn: &Connection,
    id: i64,
    solved: bool,
    solution: Option<&str>,
) -> StoreResult<usize> {
    let changes = conn.execute(
        "UPDATE issues SET is_solved = ?1, solution = ?2 WHERE id = ?3",
        params![solved, solution, id],
    )?;
    info!(id, solved, changes, "issue updated");
    Ok(changes)
}

/// Newest first. With a date only that day's issues are returned.
pub fn list_issues(conn: &Connection, date: Option<&str>) -> StoreResult<Vec<Issue>> {
    let mut out = Vec::new();
    match date {
        Some(date) => {
            let mut stmt = conn.prepare(
                "SELECT id, date, title, is_solved, solution FROM issues
                 WHERE date = ?1
                 ORDER BY id DESC",
            )?;
            for r in stmt.query_map([date], map_row)? {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, date, title, is_solved, solution FROM issues ORDER BY id DESC",
            )?;
            for r in stmt.query_map([], map_row)? {
                out.push(r?);
            }
        }
    }
    Ok(out)
}

fn map_row(row: &Row) -> rusqlite::Result<Issue> {
    Ok(Issue {
        id: row.get("id")?,
        date: row.get("date")?,
        title: row.get("title")?,
        is_solved: row.get::<_, Option<i64>>("is_solved")?.unwrap_or(0) != 0,
        solution: row.get("solution")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::open_in_memory;

    fn new_issue(date: &str, title: &str, solution: Option<&str>) -> NewIssue {
        NewIssue {
            date: Some(date.into()),
            title: Some(title.into()),
            is_solved: solution.is_some(),
            solution: solution.map(str::to_string),
        }
    }

    #[test]
    fn toggle_overwrites_existing_solution() {
        let conn = open_in_memory().unwrap();
        let id = add_issue(
            &conn,
            &new_issue("2024-01-15", "Render crash", Some("Reinstalled codec pack v2")),
        )
        .unwrap();

        assert_eq!(toggle_issue(&conn, id, true).unwrap(), 1);

        let issue = list_issues(&conn, None).unwrap().remove(0);
        assert!(issue.is_solved);
        assert_eq!(issue.solution.as_deref(), Some(SOLVED_PLACEHOLDER));
    }

    #[test]
    fn toggle_back_to_unsolved_still_writes_placeholder() {
        let conn = open_in_memory().unwrap();
        let id = add_issue(&conn, &new_issue("2024-01-15", "Audio drift", None)).unwrap();

        toggle_issue(&conn, id, false).unwrap();

        let issue = list_issues(&conn, None).unwrap().remove(0);
        assert!(!issue.is_solved);
        assert_eq!(issue.solution.as_deref(), Some(SOLVED_PLACEHOLDER));
    }

    #[test]
    fn update_keeps_given_solution() {
        let conn = open_in_memory().unwrap();
        let id = add_issue(&conn, &new_issue("2024-01-15", "Audio drift", None)).unwrap();

        update_issue(&conn, id, true, Some("Resampled to 48k")).unwrap();

        let issue = list_issues(&conn, None).unwrap().remove(0);
        assert!(issue.is_solved);
        assert_eq!(issue.solution.as_deref(), Some("Resampled to 48k"));
    }

    #[test]
    fn unknown_id_changes_nothing() {
        let conn = open_in_memory().unwrap();
        assert_eq!(toggle_issue(&conn, 404, true).unwrap(), 0);
    }

    #[test]
    fn list_is_newest_first_and_filters_by_date() {
        let conn = open_in_memory().unwrap();
        let a = add_issue(&conn, &new_issue("2024-01-14", "a", None)).unwrap();
        let b = add_issue(&conn, &new_issue("2024-01-15", "b", None)).unwrap();
        let c = add_issue(&conn, &new_issue("2024-01-14", "c", None)).unwrap();

        let all: Vec<i64> = list_issues(&conn, None).unwrap().iter().map(|i| i.id).collect();
        assert_eq!(all, [c, b, a]);

        let day: Vec<i64> = list_issues(&conn, Some("2024-01-14"))
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(day, [c, a]);
    }
}
