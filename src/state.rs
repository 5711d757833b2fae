use rusqlite::Connection;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handlers share one SQLite connection; each request holds the lock for
/// the duration of its statements. Store calls are synchronous rusqlite
/// calls made directly on the runtime worker, sized for a single operator.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }
}
