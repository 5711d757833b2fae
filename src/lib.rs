pub mod app;
pub mod errors;
pub mod handlers;
pub mod issues;
pub mod models;
pub mod projects;
pub mod reports;
pub mod resources;
pub mod state;
pub mod storage;
pub mod task_log;

pub use app::router;
pub use state::AppState;
pub use storage::{open_db, resolve_db_path};
