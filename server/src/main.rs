//! Serves the bookshelf GraphQL API over HTTP.
//! Note that all data lives in memory: a restart brings back the original eight books.
use crate::{
    app::build_app,
    config::{Config, LogFormat},
    errors::ServerError,
};
use bookshelf::{Store, build_schema};
use clap::Parser as _;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Tests of the HTTP surface.
#[cfg(test)]
mod api_testing;
mod app;
mod config;
mod errors;

/// Used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "bookshelf=info,bookshelf_server=info,tower_http=info";

/// Installs the global subscriber.
fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

/// Seeds the store, binds the listener and serves until the server fails.
///
/// # Errors
/// Returns an error if the address cannot be bound or serving stops.
async fn serve(config: Config) -> Result<(), ServerError> {
    let addr = config.addr();
    let schema = build_schema(Store::with_fixtures());
    let app = build_app(schema, config.graphiql());

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, graphiql = config.graphiql(), "Server is starting in port {}", addr.port());

    axum::serve(listener, app)
        .await
        .map_err(|source| ServerError::Serve { addr, source })
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    init_tracing(config.log_format);

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        },
    }
}
