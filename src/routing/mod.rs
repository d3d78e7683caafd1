//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing call (method, URL, query, body, headers)
//!     → normalize.rs (strip origin and deployment prefix, force API root)
//!     → router.rs (ordered scan, method filter)
//!     → matcher.rs (pattern match, path parameter capture)
//!     → Return: Matched(envelope), Unmatched or Faulted
//!
//! Route Compilation (at startup):
//!     RouteEntry[] (one set per resource domain, concatenated)
//!     → Canonicalize patterns with the API root
//!     → Freeze as immutable Registry
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod matcher;
pub mod normalize;
pub mod router;

pub use matcher::{PathParams, RoutePattern};
pub use normalize::UrlNormalizer;
pub use router::{Dispatch, Registry, RouteEntry};
