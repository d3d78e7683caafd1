//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Client, fallback adapter, developer server:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
