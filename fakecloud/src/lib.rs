pub mod configuration;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod model;
pub mod startup;

use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared state handed to every handler.
///
/// The store is owned by whoever constructs the `App`; handlers only borrow it.
#[derive(Debug, Clone)]
pub struct App {
    pool: Arc<SqlitePool>,
}

impl App {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
