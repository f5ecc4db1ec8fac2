#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod realtime;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use domain::{GameView, SeatedPlayer};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use realtime::{Subscription, ViewerHub};
pub use services::{GameObserver, GameRegistry, GameService};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
