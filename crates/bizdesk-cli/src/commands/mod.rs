//! Command handlers, one module per resource.

pub(crate) mod companies;
pub(crate) mod dashboard;
pub(crate) mod devices;
pub(crate) mod partners;
pub(crate) mod session;
pub(crate) mod transactions;
pub(crate) mod vendors;
