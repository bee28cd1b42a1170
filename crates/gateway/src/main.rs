use std::sync::Arc;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use launchpad_gateway::{
    app::{build_router, AppState},
    config::{ApplicationEnv, GatewayConfig},
    datasources::LaunchApi,
    db::{create_pool, run_migrations},
    ResultExt,
};

#[ctor::ctor]
fn init() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,launchpad_gateway=debug,tower_http=info")),
        )
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_env = ApplicationEnv::from_env()?;
    let config = GatewayConfig::load().log("Failed to load gateway configuration")?;

    let pool = create_pool(&config.store)
        .await
        .log("Failed to open the store")?;
    run_migrations(&pool)
        .await
        .log("Failed to migrate the store")?;

    let launch_api = Arc::new(LaunchApi::new(&config.launches).log("Failed to build launches client")?);
    tracing::info!(base_url = %launch_api.base_url(), "launches provider");

    let addr = config.listen_addr();
    let playground = config.server.playground;
    let app = build_router(AppState::new(pool, launch_api, config));

    // Under test the router is exercised directly; no socket is opened.
    if app_env.is_test() {
        tracing::info!("APP_ENV=test, not starting the listener");
        return Ok(());
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .log("Failed to bind to address")?;
    tracing::info!(%addr, "Server is running, GraphQL endpoint: POST /graphql");
    if playground {
        tracing::info!("Explore at http://localhost:{}/graphql", listener.local_addr()?.port());
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .log("Failed to serve app")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
