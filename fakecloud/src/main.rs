use anyhow::Context;
use tokio::net::TcpListener;

use common::telemetry::{get_subscriber, init_subscriber};
use fakecloud::{configuration::get_configuration, database, startup::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("fakecloud".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration")?;
    let connection_pool = database::connect(&configuration.database)
        .await
        .context("Failed to open database")?;
    database::run_migrations(&connection_pool)
        .await
        .context("Failed to run migrations")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    tracing::info!("Starting server on {}", address);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    run(listener, connection_pool)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
