//! Company management (client surface).

use bizdesk_api_models::{
    Company, CompanyInput, CompanyUpdate, ListQuery, ListResponse, MessageResponse,
};
use tracing::error;

use super::item_path;
use crate::client::ApiClient;
use crate::error::ApiResult;

const COMPANIES_PATH: &str = "/partner/companies";

/// `GET /partner/companies`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn list_companies(
    client: &ApiClient,
    query: &ListQuery,
) -> ApiResult<ListResponse<Company>> {
    client
        .get_with(COMPANIES_PATH, query)
        .await
        .inspect_err(|err| error!(error = %err, "failed to list companies"))
}

/// `GET /partner/companies/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn get_company(client: &ApiClient, id: &str) -> ApiResult<Company> {
    client
        .get(&item_path(COMPANIES_PATH, id))
        .await
        .inspect_err(|err| error!(error = %err, company_id = id, "failed to fetch company"))
}

/// `POST /partner/companies`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn create_company(client: &ApiClient, input: &CompanyInput) -> ApiResult<Company> {
    client
        .post(COMPANIES_PATH, input)
        .await
        .inspect_err(|err| error!(error = %err, name = %input.name, "failed to create company"))
}

/// `PATCH /partner/companies/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn update_company(
    client: &ApiClient,
    id: &str,
    update: &CompanyUpdate,
) -> ApiResult<Company> {
    client
        .patch(&item_path(COMPANIES_PATH, id), update)
        .await
        .inspect_err(|err| error!(error = %err, company_id = id, "failed to update company"))
}

/// `DELETE /partner/companies/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn delete_company(client: &ApiClient, id: &str) -> ApiResult<Option<MessageResponse>> {
    client
        .delete(&item_path(COMPANIES_PATH, id))
        .await
        .inspect_err(|err| error!(error = %err, company_id = id, "failed to delete company"))
}
