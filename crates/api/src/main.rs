use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use drawer_api::app::{self, services::AppServices};
use drawer_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    drawer_observability::init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(config.store_timeout)
        .connect(&config.database_url)
        .await
        .context("failed to connect to postgres")?;

    drawer_infra::MIGRATOR
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let services = AppServices::postgres(pool, config.store_timeout);
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
