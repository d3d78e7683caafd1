//! HTTP client and developer server subsystem.
//!
//! # Data Flow
//! ```text
//! service call
//!     → request.rs (OutboundRequest: method, url, query, body, headers)
//!     → interceptor.rs (bearer token, request id)
//!     → client.rs (synthetic mode or reqwest transport)
//!     → fallback.rs (recover failed calls from the mock backend)
//!     → envelope.rs (code / message / data)
//!     → error.rs (classify failures, user-visible messages)
//!
//! server.rs exposes the same mock backend over real HTTP (Axum).
//! ```

pub mod client;
pub mod envelope;
pub mod error;
pub mod fallback;
pub mod interceptor;
pub mod request;
pub mod server;

pub use client::{LogNotifier, Notifier, Payload, RequestClient};
pub use envelope::Envelope;
pub use error::{ClientError, ErrorCategory};
pub use fallback::{FallbackAdapter, SyntheticResponse};
pub use interceptor::{BearerTokenInterceptor, RequestIdInterceptor, RequestInterceptor};
pub use request::{OutboundRequest, X_REQUEST_ID};
pub use server::MockServer;
