use anyhow::Result;
use billing_service::{
    api::{self, AppState},
    config::AppConfig,
    observability,
};
use energy_store::db;
use sqlx::sqlite::SqlitePoolOptions;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    // Load configuration
    let cfg = AppConfig::load()?;

    let metrics = observability::init_metrics();

    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.database.max_connections)
        .connect(&cfg.database.url)
        .await?;
    db::init_schema(&pool).await?;

    let state = AppState {
        pool,
        price_per_kwh: cfg.billing.price_per_kwh,
        metrics: Some(metrics),
    };
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.http.bind_addr).await?;
    tracing::info!(addr = %cfg.http.bind_addr, "billing service listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
