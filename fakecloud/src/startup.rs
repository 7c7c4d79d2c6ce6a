use std::future::{Future, IntoFuture};
use tokio::net::TcpListener;

use sqlx::SqlitePool;

use crate::{App, handlers::app};

/// Build the service around `db_pool` and return the future that serves it.
pub fn run(
    listener: TcpListener,
    db_pool: SqlitePool,
) -> impl Future<Output = std::io::Result<()>> + Send + 'static {
    let app = app(App::new(db_pool));
    axum::serve(listener, app).into_future()
}
