//! Business logic services for the application layer.

pub mod click_service;
pub mod link_service;
pub mod redirect_service;
pub mod stats_service;
pub mod sweep_service;

pub use click_service::ClickService;
pub use link_service::{BatchOutcome, ItemFailure, LinkService};
pub use redirect_service::{RedirectDecision, RedirectService};
pub use stats_service::{StatsService, StatsSnapshot};
pub use sweep_service::{SweepService, SweeperHandle};
