//! Transaction ledger (`bizdesk transactions ...`).

use bizdesk_api_models::TransactionInput;
use bizdesk_client::services::transactions;
use bizdesk_config::AppKind;

use crate::cli::{OutputFormat, TransactionCommand};
use crate::client::{AppContext, CliError, CliResult, read_json_file};
use crate::output::{render_item, render_list};

pub(crate) async fn handle(
    ctx: &AppContext,
    command: TransactionCommand,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_app(AppKind::Client, "transactions")?;
    let client = &ctx.client;
    match command {
        TransactionCommand::Ls(args) => {
            let list = transactions::list_transactions(client, &args.into()).await?;
            render_list(&list, format)
        }
        TransactionCommand::Get(args) => {
            let transaction = transactions::get_transaction(client, &args.id).await?;
            render_item(&transaction, format)
        }
        TransactionCommand::Create(args) => {
            let input: TransactionInput = read_json_file(&args.file)?;
            if !input.amount.is_finite() || input.amount <= 0.0 {
                return Err(CliError::validation("amount must be a positive number"));
            }
            let transaction = transactions::create_transaction(client, &input).await?;
            render_item(&transaction, format)
        }
    }
}
