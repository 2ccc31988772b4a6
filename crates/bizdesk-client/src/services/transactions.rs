//! Transaction ledger (client surface).

use bizdesk_api_models::{ListResponse, Transaction, TransactionFilter, TransactionInput};
use tracing::error;

use super::item_path;
use crate::client::ApiClient;
use crate::error::ApiResult;

// Singular on the backend, unlike the other collections.
const TRANSACTIONS_PATH: &str = "/partner/transaction";

/// `GET /partner/transaction` with filters in the query string.
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn list_transactions(
    client: &ApiClient,
    filter: &TransactionFilter,
) -> ApiResult<ListResponse<Transaction>> {
    client
        .get_with(TRANSACTIONS_PATH, filter)
        .await
        .inspect_err(|err| error!(error = %err, "failed to list transactions"))
}

/// `GET /partner/transaction/:id`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn get_transaction(client: &ApiClient, id: &str) -> ApiResult<Transaction> {
    client
        .get(&item_path(TRANSACTIONS_PATH, id))
        .await
        .inspect_err(|err| error!(error = %err, transaction_id = id, "failed to fetch transaction"))
}

/// `POST /partner/transaction`
///
/// # Errors
///
/// Returns the original [`crate::ApiError`] after logging it.
pub async fn create_transaction(
    client: &ApiClient,
    input: &TransactionInput,
) -> ApiResult<Transaction> {
    client
        .post(TRANSACTIONS_PATH, input)
        .await
        .inspect_err(|err| error!(error = %err, kind = input.kind.as_str(), "failed to record transaction"))
}
