mod airtable;
mod config;
mod contact;
mod errors;
mod images;
mod models;
mod pages;
mod records;
mod render;
mod routes;
mod sources;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::airtable::{RecordsApiClient, RecordsApiConfig};
use crate::config::{Config, DataSourceKind};
use crate::contact::ContactSubmitter;
use crate::images::ImageResolver;
use crate::records::Table;
use crate::routes::build_router;
use crate::sources::{DataStore, LocalTable, RecordSource, RemoteTable};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting portfolio v{}", env!("CARGO_PKG_VERSION"));

    // Records API client, shared by the remote source and the contact form
    let records_api = build_records_api(&config)?;

    let source: Arc<dyn RecordSource> = match config.data_source {
        DataSourceKind::Local => {
            info!("Reading tables from {}", config.data_dir.display());
            Arc::new(LocalTable::new(config.data_dir.clone()))
        }
        DataSourceKind::Remote => {
            info!("Reading tables from base {}", config.airtable_base_id);
            Arc::new(RemoteTable::new(records_api.clone()))
        }
    };

    let data = DataStore::new(source, config.cache_policy.clone());
    for table in Table::ALL {
        match data.policy().ttl_for(table) {
            Some(ttl) => info!("Cache TTL for '{table}': {}s", ttl.as_secs()),
            None => info!("Cache TTL for '{table}': unbounded"),
        }
    }

    let state = AppState {
        data,
        images: ImageResolver::new(config.images_dir.clone()),
        contact: ContactSubmitter::new(records_api),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the records API client, or `None` when no credential is configured.
/// A missing key only disables the contact form (and remote tables).
fn build_records_api(config: &Config) -> Result<Option<RecordsApiClient>> {
    let Some(api_key) = config.airtable_api_key.clone() else {
        warn!("AIRTABLE_API_KEY is not set: the contact form will not work");
        return Ok(None);
    };

    let client = RecordsApiClient::new(RecordsApiConfig {
        api_url: config.airtable_api_url.clone(),
        base_id: config.airtable_base_id.clone(),
        api_key,
        timeout: config.http_timeout,
    })?;
    info!("Records API client initialized (timeout: {}s)", config.http_timeout.as_secs());
    Ok(Some(client))
}
