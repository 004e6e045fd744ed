use std::net::TcpListener;

use anyhow::Context;
use env_logger::Env;
use shelfwatch::{configuration::get_configuration, startup::run};
use sqlx::sqlite::SqlitePoolOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration")?;

    let connection_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(configuration.database.connect_options());

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)
        .with_context(|| format!("Failed to bind to {}", address))?;
    log::info!("Dashboard listening on http://{}", address);

    run(listener, connection_pool)?.await?;
    Ok(())
}
