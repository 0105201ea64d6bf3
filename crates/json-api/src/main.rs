//! BRIX JSON API Server

use std::{process, sync::Arc};

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info, warn};

use brix_app::{
    context::AppContext,
    storage::{JsonFileStore, MemoryStore, SnapshotStore},
};

use crate::{config::ServerConfig, router::app_router, state::State};

mod auth;
mod clients;
mod config;
mod extensions;
mod healthcheck;
mod identities;
mod observability;
mod router;
mod session;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod trackings;

/// BRIX JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {init_error}");
        }

        process::exit(1);
    }

    let persistence: Arc<dyn SnapshotStore> = match &config.storage.data_file {
        Some(path) => {
            info!(path = %path.display(), "using snapshot file");

            Arc::new(JsonFileStore::new(path.clone()))
        }
        None => {
            warn!("BRIX_DATA_FILE not set, data will be lost on exit");

            Arc::new(MemoryStore::new())
        }
    };

    let admin = match config.bootstrap.admin() {
        Ok(admin) => admin,
        Err(config_error) => {
            error!("invalid bootstrap admin: {config_error}");

            process::exit(1);
        }
    };

    let app = match AppContext::open(persistence, admin).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(app_router());

    let doc = OpenApi::new("BRIX API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
