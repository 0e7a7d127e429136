//! Shared application state handed to every request handler.

use platter_db::Database;

/// Shared application state.
///
/// `Database` is a thin wrapper over a connection pool, so cloning the
/// state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
