#![allow(dead_code)]

use axum::Router;
use axum::routing::get;
use chrono::{DateTime, Utc};
use link_registry::api::handlers::{health_handler, redirect_handler};
use link_registry::api::routes::api_routes;
use link_registry::domain::click_event::ClickEvent;
use link_registry::domain::clock::ManualClock;
use link_registry::infrastructure::event_log::EventLogger;
use link_registry::infrastructure::storage::{MemorySlotStore, SlotStore};
use link_registry::state::{AppState, RegistrySettings};
use std::sync::Arc;
use tokio::sync::mpsc;

pub const ORIGIN: &str = "https://sho.rt";

pub fn start() -> DateTime<Utc> {
    DateTime::from_timestamp(1_750_000_000, 0).unwrap()
}

pub struct TestApp {
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    pub store: Arc<MemorySlotStore>,
    pub click_rx: mpsc::Receiver<ClickEvent>,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with_store(Arc::new(MemorySlotStore::new()))
}

pub fn create_test_app_with_store(store: Arc<MemorySlotStore>) -> TestApp {
    let clock = Arc::new(ManualClock::new(start()));
    let (tx, rx) = mpsc::channel(100);

    let settings = RegistrySettings {
        public_origin: ORIGIN.to_string(),
        ..RegistrySettings::default()
    };

    let state = AppState::new(
        store.clone() as Arc<dyn SlotStore>,
        clock.clone(),
        EventLogger::disabled(),
        tx,
        settings,
    );

    TestApp {
        state,
        clock,
        store,
        click_rx: rx,
    }
}

/// Full route table without the outer middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_routes())
        .with_state(state)
}
