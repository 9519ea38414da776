use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::logging::Logger;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use vestibule_app::app::api::routes;
use vestibule_app::config::ConfigHandler;
use vestibule_app::db_handler::DbProviderHandler;
use vestibule_core::config::load_config;
use vestibule_db::db::DbProvider;
use vestibule_db::db::connection::create_pool;
use vestibule_db::db::migrate::run_migrations;
use vestibule_service::auth::{CredentialValidatorHandler, build_validator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Vestibule visitor registry");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let office_timezone = config.registry.office_timezone()?;
    tracing::info!(timezone = ?office_timezone, "Office timezone resolved");

    run_migrations(&config.database.url).await?;

    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;
    let provider: Arc<dyn DbProvider> = Arc::new(pool);

    let validator = build_validator(&config, provider.clone())?;
    tracing::info!(auth_method = ?config.auth.method, "Credential validator ready");

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(Logger::new())
        .hoop(DbProviderHandler::new(provider))
        .hoop(CredentialValidatorHandler { validator })
        .hoop(ConfigHandler::new(config.clone()))
        .push(routes());

    tracing::info!(origin = %config.server.origin(), "Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
