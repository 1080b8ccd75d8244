use simple_graph_api::api::build_router;
use simple_graph_api::config::AppConfig;
use simple_graph_api::graph::{self, DefaultHooks, GraphSettings};
use simple_graph_api::lifecycle::{seed, setup_tracing, ContentSystem, Fixture};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AppConfig::load().map_err(|e| e.to_string())?;
    let settings = Arc::new(GraphSettings::from_config(&config.graph, &config.post_types));

    let system = ContentSystem::new();
    if let Some(path) = &config.server.seed_path {
        let fixture = Fixture::load(path).await.map_err(|e| e.to_string())?;
        seed(&system, fixture).await.map_err(|e| e.to_string())?;
    }

    let assembler = graph::assembler(&system, settings, Arc::new(DefaultHooks));
    let app = build_router(assembler, &config.server.base_path);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .map_err(|e| format!("Failed to bind {}: {e}", config.server.bind))?;
    info!(bind = %config.server.bind, base = %config.server.base_path, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .map_err(|e| e.to_string())?;

    system.shutdown().await
}
