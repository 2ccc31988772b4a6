#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

//! Authenticated REST client for the Bizdesk backend.
//!
//! Layout:
//! - `client.rs`: the shared [`ApiClient`] and its request pipeline
//! - `interceptors.rs`: bearer selection before a call, failure inspection after it
//! - `session/`: the [`SessionStore`] capability plus memory and file backends
//! - `events.rs`: session-invalidated notifications for the composing app
//! - `services/`: one function per REST endpoint
//! - `redirect.rs`: route decision for scanned device QR codes

pub mod client;
pub mod error;
pub mod events;
pub mod interceptors;
pub mod redirect;
pub mod services;
pub mod session;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult, AuthFailure, ErrorClass};
pub use events::{LOGIN_ROUTE, SessionEvent, SessionEvents};
pub use redirect::{DeviceRoute, ProbeOutcome, resolve_device_route};
pub use session::{
    FileSessionStore, MemorySessionStore, Session, SessionStore, SessionStoreError, UserType,
};
