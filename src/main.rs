//! Dreamcatcher booking server.
//!
//! Config, pool, migrations and seeding must all succeed before the listener
//! is bound; any failure aborts startup with a non-zero exit.

use dreamcatcher_server::{config::Config, db, startup, state::AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG wins; otherwise info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let state = AppState::new(pool, &config);
    db::bootstrap(&state, &config).await?;

    let app = startup::router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
