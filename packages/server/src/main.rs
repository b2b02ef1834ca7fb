use anyhow::Context;
use tracing::info;

use classroom_server::config::AppConfig;
use classroom_server::state::AppState;
use classroom_server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    tracing_subscriber::fmt()
        .with_max_level(config.server.level())
        .init();

    let db = database::init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    seed::seed_role_permissions(&db).await?;
    seed::ensure_indexes(&db).await?;

    if !config.auth.enforce_roles {
        tracing::warn!("Role enforcement is disabled; every authenticated user may mutate activities");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { db, config };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
