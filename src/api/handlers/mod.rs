//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod redirect;
pub mod stats;
pub mod sweep;

pub use health::health_handler;
pub use links::{
    clear_links_handler, create_links_handler, get_link_handler, list_links_handler,
    record_click_handler,
};
pub use redirect::redirect_handler;
pub use stats::stats_handler;
pub use sweep::sweep_handler;
