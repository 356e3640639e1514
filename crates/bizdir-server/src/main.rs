mod api;
mod middleware;
mod scheduler;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(bizdir_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let grid = match &config.grid_path {
        Some(path) => bizdir_core::load_grid(path)
            .with_context(|| format!("failed to load grid from {}", path.display()))?,
        None => bizdir_core::default_grid(),
    };
    tracing::info!(
        env = %config.env,
        cities = grid.cities.len(),
        categories = grid.categories.len(),
        "starting bizdir-server"
    );

    let pool_config = bizdir_db::PoolConfig::from_app_config(&config);
    let pool = bizdir_db::connect_pool(&config.database_url, pool_config).await?;
    bizdir_db::run_migrations(&pool).await?;

    let state = AppState {
        pool,
        config: Arc::clone(&config),
        grid: Arc::new(grid),
    };

    let _scheduler = scheduler::build_scheduler(state.clone()).await?;

    let auth = AuthState::from_config(&config)?;
    let app = build_app(state, auth);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
