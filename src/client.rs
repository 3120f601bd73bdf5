//! Client construction and per-call context.
//!
//! Configuration is resolved once by [`ClientBuilder`] and shared read-only by
//! every call. Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod config;
pub mod core;
pub(crate) mod error_classification;
pub(crate) mod policy;
pub mod types;

pub use builder::ClientBuilder;
pub use config::{ClientConfig, Region};
pub use core::ZaiClient;
pub use types::RequestContext;
