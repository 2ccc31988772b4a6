//! Partner administration (`bizdesk --app admin partners ...`).

use bizdesk_api_models::{PartnerRegistration, PartnerUpdate};
use bizdesk_client::services::partners;
use bizdesk_config::AppKind;

use crate::cli::{OutputFormat, PartnerCommand};
use crate::client::{AppContext, CliResult, read_json_file};
use crate::output::{render_ack, render_item, render_list};

pub(crate) async fn handle(
    ctx: &AppContext,
    command: PartnerCommand,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_app(AppKind::Admin, "partners")?;
    let client = &ctx.client;
    match command {
        PartnerCommand::Register(args) => {
            let registration: PartnerRegistration = read_json_file(&args.file)?;
            let partner = partners::register_partner(client, &registration).await?;
            render_item(&partner, format)
        }
        PartnerCommand::Ls(args) => {
            let list = partners::list_partners(client, &args.into()).await?;
            render_list(&list, format)
        }
        PartnerCommand::Get(args) => {
            let partner = partners::get_partner(client, &args.id).await?;
            render_item(&partner, format)
        }
        PartnerCommand::Update(args) => {
            let update: PartnerUpdate = read_json_file(&args.file)?;
            let partner = partners::update_partner(client, &args.id, &update).await?;
            render_item(&partner, format)
        }
        PartnerCommand::Toggle(args) => {
            let partner = partners::toggle_partner(client, &args.id).await?;
            render_item(&partner, format)
        }
        PartnerCommand::Rm(args) => {
            let ack = partners::delete_partner(client, &args.id).await?;
            render_ack(ack.as_ref(), "Partner deleted", format)
        }
    }
}
