use crate::backend::RestBackend;
use crate::config::AppConfig;
use crate::db::{init_db, Database};
use crate::responses::error_to_response;
use crate::router::{handle, AppContext};
use astra::Server;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod backend;
mod config;
mod db;
mod domain;
mod errors;
mod handlers;
mod i18n;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    // Optional .env file.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "icumbi_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let db = Database::new(config.database_path.clone());
    if let Err(e) = init_db(&db, &config.schema_path) {
        error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let backend = match RestBackend::new(&config.backend) {
        Ok(backend) => backend,
        Err(e) => {
            error!(error = %e, "could not build backend client");
            std::process::exit(1);
        }
    };

    let ctx = AppContext {
        db,
        backend: Arc::new(backend),
        session_ttl_secs: config.session_ttl_secs,
        default_language: config.default_language,
    };

    let addr = config.addr;
    info!(%addr, backend = %config.backend.url, "starting server");

    let server = Server::bind(&addr).max_workers(config.max_workers);
    let result = server.serve(move |req, _info| {
        handle(req, &ctx).unwrap_or_else(error_to_response)
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down");
}
