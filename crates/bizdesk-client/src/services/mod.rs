//! REST service functions.
//!
//! Each function issues exactly one call and returns the decoded payload.
//! On failure it logs one `error!` event naming the operation and hands back
//! the original [`crate::ApiError`]; nothing is retried or rewritten.

pub mod companies;
pub mod dashboard;
pub mod devices;
pub mod partners;
pub mod transactions;
pub mod vendors;

/// Append an id to a collection path as a single encoded segment.
pub(crate) fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", urlencoding::encode(id))
}
