use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use openmensa_app::app::api::routes;
use openmensa_app::bootstrap::bootstrap_admin;
use openmensa_app::config::ConfigHandler;
use openmensa_app::store_handler::StoreHandler;
use openmensa_core::config::load_config;
use openmensa_db::store::{Repository, memory::MemoryStore};
use openmensa_service::auth::{
    Authorizer,
    casbin::{CasbinEnforcerHandler, init_casbin},
};

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

    tracing::info!("Starting OpenMensa server");

    let config = Arc::new(load_config()?);

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let providers = config.auth.enabled_providers();
    tracing::info!(providers = ?providers, "Login providers enabled");

    let store = MemoryStore::new();
    let enforcer = Arc::new(init_casbin().await?);

    if let Some(issued) = bootstrap_admin(&store, &Authorizer::new(enforcer.clone()), &config)? {
        tracing::info!(
            user_id = %issued.token.user_id,
            access_token = %issued.secret,
            "Bootstrap administrator token issued"
        );
    }

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let store: Arc<dyn Repository> = Arc::new(store);
    let router = Router::new()
        .hoop(StoreHandler { store })
        .hoop(ConfigHandler {
            settings: config.clone(),
        })
        .hoop(CasbinEnforcerHandler { enforcer })
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
