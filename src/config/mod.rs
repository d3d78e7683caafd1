//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + LOGISTICS_* environment variables
//!     → loader.rs (parse, deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → policy.rs (resolve_policy: synthetic / fallback / base address)
//!     → shared by the request client and the fallback adapter
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Environment-conditional branching lives in one pure function

pub mod loader;
pub mod policy;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use policy::{resolve_policy, Policy};
pub use schema::{BuildMode, ClientConfig, EnvironmentConfig};
