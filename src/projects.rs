use crate::errors::StoreResult;
use crate::models::{NewProject, Project};
use crate::storage::timestamp_now;
use rusqlite::{params, Connection, Row};
use tracing::info;

pub fn add_project(conn: &Connection, project: &NewProject) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO projects (title, category, description, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            project.title,
            project.category,
            project.description,
            timestamp_now(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    info!(id, "project created");
    Ok(id)
}

pub fn list_projects(conn: &Connection) -> StoreResult<Vec<Project>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, category, description, created_at FROM projects
         ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_project(conn: &Connection, id: i64) -> StoreResult<usize> {
    let changes = conn.execute("DELETE FROM projects WHERE id = ?1", [id])?;
    info!(id, changes, "project deleted");
    Ok(changes)
}

fn map_row(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        title: row.get("title")?,
        category: row.get("category")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::open_in_memory;

    #[test]
    fn create_list_delete() {
        let conn = open_in_memory().unwrap();
        let first = add_project(
            &conn,
            &NewProject {
                title: Some("Launch film".into()),
                category: Some("video".into()),
                description: None,
            },
        )
        .unwrap();
        let second = add_project(&conn, &NewProject::default()).unwrap();

        let listed = list_projects(&conn).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second);
        assert!(listed.iter().all(|p| p.created_at.is_some()));

        assert_eq!(delete_project(&conn, first).unwrap(), 1);
        assert_eq!(delete_project(&conn, first).unwrap(), 0);

        let remaining: Vec<i64> = list_projects(&conn).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(remaining, [second]);
    }
}
