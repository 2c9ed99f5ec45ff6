//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{
    ClickService, LinkService, RedirectService, StatsService, SweepService,
};
use crate::config::Config;
use crate::domain::click_event::ClickEvent;
use crate::domain::clock::Clock;
use crate::domain::validation::DEFAULT_BATCH_MAX_SIZE;
use crate::infrastructure::event_log::EventLogger;
use crate::infrastructure::persistence::{DEFAULT_SLOT, SlotLinkRepository};
use crate::infrastructure::storage::SlotStore;
use crate::utils::code_generator::DEFAULT_CODE_LENGTH;

/// Registry tuning shared by the server and the admin CLI.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub public_origin: String,
    pub storage_slot: String,
    pub code_length: usize,
    pub batch_max_size: usize,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            public_origin: "http://localhost:3000".to_string(),
            storage_slot: DEFAULT_SLOT.to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            batch_max_size: DEFAULT_BATCH_MAX_SIZE,
        }
    }
}

impl From<&Config> for RegistrySettings {
    fn from(config: &Config) -> Self {
        Self {
            public_origin: config.public_origin.clone(),
            storage_slot: config.storage_slot.clone(),
            code_length: config.code_length,
            batch_max_size: config.batch_max_size,
        }
    }
}

/// Application state with all services wired to one link repository.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<SlotLinkRepository>>,
    pub redirect_service: Arc<RedirectService<SlotLinkRepository>>,
    pub click_service: Arc<ClickService<SlotLinkRepository>>,
    pub sweep_service: Arc<SweepService<SlotLinkRepository>>,
    pub stats_service: Arc<StatsService<SlotLinkRepository>>,
    pub storage: Arc<dyn SlotStore>,
    pub clock: Arc<dyn Clock>,
    pub events: EventLogger,
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub public_origin: String,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn SlotStore>,
        clock: Arc<dyn Clock>,
        events: EventLogger,
        click_sender: mpsc::Sender<ClickEvent>,
        settings: RegistrySettings,
    ) -> Self {
        let repository = Arc::new(SlotLinkRepository::new(
            storage.clone(),
            settings.storage_slot,
        ));

        let link_service = LinkService::new(repository.clone(), clock.clone(), events.clone())
            .with_code_length(settings.code_length)
            .with_batch_max_size(settings.batch_max_size);

        Self {
            link_service: Arc::new(link_service),
            redirect_service: Arc::new(RedirectService::new(
                repository.clone(),
                clock.clone(),
                click_sender.clone(),
                events.clone(),
            )),
            click_service: Arc::new(ClickService::new(
                repository.clone(),
                clock.clone(),
                events.clone(),
            )),
            sweep_service: Arc::new(SweepService::new(
                repository.clone(),
                clock.clone(),
                events.clone(),
            )),
            stats_service: Arc::new(StatsService::new(repository, clock.clone(), events.clone())),
            storage,
            clock,
            events,
            click_sender,
            public_origin: settings.public_origin,
        }
    }
}
