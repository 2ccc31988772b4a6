//! Partner dashboard.

use bizdesk_api_models::DashboardStats;
use tracing::error;

use crate::client::ApiClient;
use crate::error::ApiResult;

const STATS_PATH: &str = "/partner/dashboard/stats";

/// `GET /partner/dashboard/stats`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn dashboard_stats(client: &ApiClient) -> ApiResult<DashboardStats> {
    client
        .get(STATS_PATH)
        .await
        .inspect_err(|err| error!(error = %err, "failed to fetch dashboard stats"))
}
