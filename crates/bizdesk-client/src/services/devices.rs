//! Device registry (client surface).

use bizdesk_api_models::{
    Device, DeviceInput, DeviceUpdate, ListQuery, ListResponse, MessageResponse,
};
use tracing::error;

use super::item_path;
use crate::client::ApiClient;
use crate::error::ApiResult;

pub(crate) const DEVICES_PATH: &str = "/partner/devices";

/// `GET /partner/devices`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn list_devices(
    client: &ApiClient,
    query: &ListQuery,
) -> ApiResult<ListResponse<Device>> {
    client
        .get_with(DEVICES_PATH, query)
        .await
        .inspect_err(|err| error!(error = %err, "failed to list devices"))
}

/// `GET /partner/devices/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn get_device(client: &ApiClient, id: &str) -> ApiResult<Device> {
    client
        .get(&item_path(DEVICES_PATH, id))
        .await
        .inspect_err(|err| error!(error = %err, device_id = id, "failed to fetch device"))
}

/// `POST /partner/devices`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn register_device(client: &ApiClient, input: &DeviceInput) -> ApiResult<Device> {
    client
        .post(DEVICES_PATH, input)
        .await
        .inspect_err(|err| error!(error = %err, name = %input.name, "failed to register device"))
}

/// `PATCH /partner/devices/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn update_device(
    client: &ApiClient,
    id: &str,
    update: &DeviceUpdate,
) -> ApiResult<Device> {
    client
        .patch(&item_path(DEVICES_PATH, id), update)
        .await
        .inspect_err(|err| error!(error = %err, device_id = id, "failed to update device"))
}

/// `DELETE /partner/devices/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn delete_device(client: &ApiClient, id: &str) -> ApiResult<Option<MessageResponse>> {
    client
        .delete(&item_path(DEVICES_PATH, id))
        .await
        .inspect_err(|err| error!(error = %err, device_id = id, "failed to delete device"))
}
