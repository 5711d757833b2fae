use crate::errors::StoreResult;
use crate::models::{NewResource, Resource, ResourceKind};
use rusqlite::{params, Connection, Row};
use tracing::info;

pub fn add_resource(conn: &Connection, resource: &NewResource) -> StoreResult<i64> {
    conn.execute(
        "INSERT INTO resources (type, title, url) VALUES (?1, ?2, ?3)",
        params![
            resource.kind.as_ref().map(ResourceKind::as_str),
            resource.title,
            resource.url,
        ],
    )?;
    let id = conn.last_insert_rowid();
    info!(id, "resource added");
    Ok(id)
}

pub fn list_resources(conn: &Connection) -> StoreResult<Vec<Resource>> {
    let mut stmt = conn.prepare("SELECT id, type, title, url FROM resources ORDER BY id DESC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_row(row: &Row) -> rusqlite::Result<Resource> {
    Ok(Resource {
        id: row.get("id")?,
        kind: row.get::<_, Option<String>>("type")?.map(ResourceKind::from),
        title: row.get("title")?,
        url: row.get("url")?,
    })
}
