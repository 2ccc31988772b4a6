#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

//! Process configuration for the Bizdesk API client.
//!
//! Layout: `model.rs` (typed client settings), `loader.rs` (environment
//! parsing), `defaults.rs` (variable names and fallbacks), `error.rs`.

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;

pub use error::{ConfigError, ConfigResult};
pub use model::{AppKind, ClientConfig, ClientMode};
