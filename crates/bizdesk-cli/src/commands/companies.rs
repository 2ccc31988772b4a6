//! Company management (`bizdesk companies ...`).

use bizdesk_api_models::{CompanyInput, CompanyUpdate};
use bizdesk_client::services::companies;
use bizdesk_config::AppKind;

use crate::cli::{CompanyCommand, OutputFormat};
use crate::client::{AppContext, CliResult, read_json_file};
use crate::output::{render_ack, render_item, render_list};

pub(crate) async fn handle(
    ctx: &AppContext,
    command: CompanyCommand,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_app(AppKind::Client, "companies")?;
    let client = &ctx.client;
    match command {
        CompanyCommand::Ls(args) => {
            let list = companies::list_companies(client, &args.into()).await?;
            render_list(&list, format)
        }
        CompanyCommand::Get(args) => {
            let company = companies::get_company(client, &args.id).await?;
            render_item(&company, format)
        }
        CompanyCommand::Create(args) => {
            let input: CompanyInput = read_json_file(&args.file)?;
            let company = companies::create_company(client, &input).await?;
            render_item(&company, format)
        }
        CompanyCommand::Update(args) => {
            let update: CompanyUpdate = read_json_file(&args.file)?;
            let company = companies::update_company(client, &args.id, &update).await?;
            render_item(&company, format)
        }
        CompanyCommand::Rm(args) => {
            let ack = companies::delete_company(client, &args.id).await?;
            render_ack(ack.as_ref(), "Company deleted", format)
        }
    }
}
