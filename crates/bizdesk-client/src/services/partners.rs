//! Partner administration (admin surface).

use bizdesk_api_models::{
    ListQuery, ListResponse, MessageResponse, Partner, PartnerRegistration, PartnerUpdate,
};
use tracing::error;

use super::item_path;
use crate::client::ApiClient;
use crate::error::ApiResult;

const PARTNERS_PATH: &str = "/admin/partners";
const REGISTER_PATH: &str = "/admin/partners/register";
const TOGGLE_PATH: &str = "/admin/partners/toggle";

/// `POST /admin/partners/register`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn register_partner(
    client: &ApiClient,
    registration: &PartnerRegistration,
) -> ApiResult<Partner> {
    client
        .post(REGISTER_PATH, registration)
        .await
        .inspect_err(|err| error!(error = %err, email = %registration.email, "failed to register partner"))
}

/// `GET /admin/partners`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn list_partners(
    client: &ApiClient,
    query: &ListQuery,
) -> ApiResult<ListResponse<Partner>> {
    client
        .get_with(PARTNERS_PATH, query)
        .await
        .inspect_err(|err| error!(error = %err, "failed to list partners"))
}

/// `GET /admin/partners/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn get_partner(client: &ApiClient, id: &str) -> ApiResult<Partner> {
    client
        .get(&item_path(PARTNERS_PATH, id))
        .await
        .inspect_err(|err| error!(error = %err, partner_id = id, "failed to fetch partner"))
}

/// `PATCH /admin/partners/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn update_partner(
    client: &ApiClient,
    id: &str,
    update: &PartnerUpdate,
) -> ApiResult<Partner> {
    client
        .patch(&item_path(PARTNERS_PATH, id), update)
        .await
        .inspect_err(|err| error!(error = %err, partner_id = id, "failed to update partner"))
}

/// `PATCH /admin/partners/toggle/:id`: flip whether the partner may sign in.
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn toggle_partner(client: &ApiClient, id: &str) -> ApiResult<Partner> {
    client
        .patch_empty(&item_path(TOGGLE_PATH, id))
        .await
        .inspect_err(|err| error!(error = %err, partner_id = id, "failed to toggle partner status"))
}

/// `DELETE /admin/partners/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn delete_partner(client: &ApiClient, id: &str) -> ApiResult<Option<MessageResponse>> {
    client
        .delete(&item_path(PARTNERS_PATH, id))
        .await
        .inspect_err(|err| error!(error = %err, partner_id = id, "failed to delete partner"))
}
