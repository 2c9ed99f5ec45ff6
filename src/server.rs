//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, event log wiring, worker spawning, the sweep timer,
//! and the Axum server lifecycle.

use crate::config::{Config, EventLogConfig, StorageBackend};
use crate::domain::click_worker::run_click_worker;
use crate::domain::clock::SystemClock;
use crate::infrastructure::event_log::{
    AuthEndpointCredentials, CredentialProvider, EventLogger, EventSink, HttpEventSink,
    NullEventSink, StaticCredentials, run_event_worker,
};
use crate::infrastructure::storage::{FileSlotStore, MemorySlotStore, RedisSlotStore, SlotStore};
use crate::routes::app_router;
use crate::state::{AppState, RegistrySettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Opens the configured slot store.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or Redis is
/// unreachable.
pub async fn open_storage(config: &Config) -> Result<Arc<dyn SlotStore>> {
    let store: Arc<dyn SlotStore> = match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; links are lost on restart");
            Arc::new(MemorySlotStore::new())
        }
        StorageBackend::File => Arc::new(
            FileSlotStore::open(&config.data_dir)
                .await
                .with_context(|| format!("Failed to open {}", config.data_dir.display()))?,
        ),
        StorageBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL must be set for the redis backend")?;
            Arc::new(
                RedisSlotStore::connect(redis_url)
                    .await
                    .context("Failed to connect to Redis")?,
            )
        }
    };

    tracing::info!("Storage ready ({})", store.backend_name());
    Ok(store)
}

fn event_sink(event_log: Option<&EventLogConfig>) -> Result<Arc<dyn EventSink>> {
    let Some(event_log) = event_log else {
        tracing::info!("Event log disabled (NullEventSink)");
        return Ok(Arc::new(NullEventSink::new()));
    };

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .context("Failed to build HTTP client")?;

    let credentials: Arc<dyn CredentialProvider> = match (
        &event_log.auth_url,
        &event_log.client_id,
        &event_log.client_secret,
    ) {
        (Some(auth_url), Some(client_id), Some(client_secret)) => {
            let provider = AuthEndpointCredentials::new(
                client.clone(),
                auth_url.clone(),
                client_id.clone(),
                client_secret.clone(),
            );
            match &event_log.token {
                Some(token) => Arc::new(provider.with_token(token.clone())),
                None => Arc::new(provider),
            }
        }
        _ => {
            let token = event_log
                .token
                .clone()
                .context("EVENT_LOG_TOKEN must be set without client credentials")?;
            Arc::new(StaticCredentials::new(token))
        }
    };

    tracing::info!("Event log enabled");
    Ok(Arc::new(HttpEventSink::new(
        client,
        event_log.url.clone(),
        credentials,
    )))
}

/// Starts the event log worker and returns the handle services log through.
///
/// # Errors
///
/// Returns an error if the HTTP sink cannot be built.
pub fn start_event_log(config: &Config) -> Result<EventLogger> {
    let sink = event_sink(config.event_log.as_ref())?;
    let (events, event_rx) = EventLogger::channel(config.event_queue_capacity);
    tokio::spawn(run_event_worker(event_rx, sink));
    Ok(events)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Slot storage (memory, file or Redis)
/// - Event log worker
/// - Background click worker
/// - Expiry sweeper (unless disabled)
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - Storage cannot be opened
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let storage = open_storage(&config).await?;
    let events = start_event_log(&config)?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let state = AppState::new(
        storage,
        Arc::new(SystemClock),
        events,
        click_tx,
        RegistrySettings::from(&config),
    );

    tokio::spawn(run_click_worker(click_rx, state.click_service.clone()));
    tracing::info!("Click worker started");

    let sweeper = config
        .sweep_interval()
        .map(|period| state.sweep_service.clone().spawn_sweeper(period));
    if sweeper.is_none() {
        tracing::info!("Sweep timer disabled");
    }

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(sweeper) = sweeper {
        sweeper.stop().await;
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
