//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global tracing subscriber
//! - Honour `RUST_LOG` over the configured default level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Default filter covers this crate and tower-http only

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a level name.
pub fn default_directive(level: &str) -> String {
    format!("logistics_client={level},tower_http={level}")
}

/// Install the fmt subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init(level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(level).into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
