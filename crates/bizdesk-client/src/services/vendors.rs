//! Vendor management (client surface).

use bizdesk_api_models::{
    ListQuery, ListResponse, MessageResponse, Vendor, VendorInput, VendorUpdate,
};
use tracing::error;

use super::item_path;
use crate::client::ApiClient;
use crate::error::ApiResult;

const VENDORS_PATH: &str = "/partner/vendors";

/// `GET /partner/vendors`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn list_vendors(
    client: &ApiClient,
    query: &ListQuery,
) -> ApiResult<ListResponse<Vendor>> {
    client
        .get_with(VENDORS_PATH, query)
        .await
        .inspect_err(|err| error!(error = %err, "failed to list vendors"))
}

/// `GET /partner/vendors/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn get_vendor(client: &ApiClient, id: &str) -> ApiResult<Vendor> {
    client
        .get(&item_path(VENDORS_PATH, id))
        .await
        .inspect_err(|err| error!(error = %err, vendor_id = id, "failed to fetch vendor"))
}

/// `POST /partner/vendors`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn create_vendor(client: &ApiClient, input: &VendorInput) -> ApiResult<Vendor> {
    client
        .post(VENDORS_PATH, input)
        .await
        .inspect_err(|err| error!(error = %err, name = %input.name, "failed to create vendor"))
}

/// `PATCH /partner/vendors/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn update_vendor(
    client: &ApiClient,
    id: &str,
    update: &VendorUpdate,
) -> ApiResult<Vendor> {
    client
        .patch(&item_path(VENDORS_PATH, id), update)
        .await
        .inspect_err(|err| error!(error = %err, vendor_id = id, "failed to update vendor"))
}

/// `DELETE /partner/vendors/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn delete_vendor(client: &ApiClient, id: &str) -> ApiResult<Option<MessageResponse>> {
    client
        .delete(&item_path(VENDORS_PATH, id))
        .await
        .inspect_err(|err| error!(error = %err, vendor_id = id, "failed to delete vendor"))
}
