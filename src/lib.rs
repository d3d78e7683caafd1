//! Logistics workflow REST client.
//!
//! Typed calls for orders, production plans, warehousing, dispatch, carriers,
//! vessels (AIS), customs declarations and tracking, with an in-process
//! synthetic backend that answers when the real one is unreachable or when
//! synthetic mode is switched on.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller
//!     │
//!     ▼
//!   services ──▶ http::client ──▶ interceptors (token, request id)
//!                    │
//!          ┌─────────┴──────────┐
//!          ▼                    ▼
//!     reqwest transport    http::fallback
//!          │ fail ─────────────▶│
//!          ▼                    ▼
//!       Envelope           routing::Registry ──▶ mock handler sets
//!                                                    │
//!                                                    ▼
//!                                              Repository<T>
//!
//!   config::policy decides synthetic / fallback / base address
//!   http::server exposes the synthetic backend over HTTP
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod observability;
pub mod routing;
pub mod services;
pub mod storage;

pub use config::schema::ClientConfig;
pub use http::{ClientError, Envelope, MockServer, OutboundRequest, Payload, RequestClient};
pub use lifecycle::Shutdown;
pub use mock::MockBackend;
