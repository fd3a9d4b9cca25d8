//! # causerie-app
//!
//! The application shell around the chat engine: a shared [`App`] handle
//! over `Arc<Mutex<AppState>>`, a command layer grouped by domain, an
//! event bus toward UI observers, the mock verification oracle, and the
//! country directory collaborator.
//!
//! Presentation is out of scope — the command layer is the UI boundary.
//! A frontend drives the methods in [`commands`] and renders from the
//! DTOs and [`events::AppEvent`] notifications it gets back.

pub mod commands;
pub mod countries;
pub mod events;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use events::{AppEvent, EventBus};
pub use state::{App, AppState};

/// Initialise the tracing subscriber.  Call once at startup.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("causerie_app=debug,causerie_chat=debug,causerie_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!("Starting Causerie");
}
