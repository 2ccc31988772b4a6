//! Device registry and QR routing (`bizdesk devices ...`).

use bizdesk_api_models::{DeviceInput, DeviceUpdate};
use bizdesk_client::resolve_device_route;
use bizdesk_client::services::devices;
use bizdesk_config::AppKind;

use crate::cli::{DeviceCommand, OutputFormat};
use crate::client::{AppContext, CliResult, read_json_file};
use crate::output::{render_ack, render_item, render_list, render_route};

pub(crate) async fn handle(
    ctx: &AppContext,
    command: DeviceCommand,
    format: OutputFormat,
) -> CliResult<()> {
    // `open` serves both front ends.
    if !matches!(command, DeviceCommand::Open(_)) {
        ctx.require_app(AppKind::Client, "devices")?;
    }
    let client = &ctx.client;
    match command {
        DeviceCommand::Ls(args) => {
            let list = devices::list_devices(client, &args.into()).await?;
            render_list(&list, format)
        }
        DeviceCommand::Get(args) => {
            let device = devices::get_device(client, &args.id).await?;
            render_item(&device, format)
        }
        DeviceCommand::Register(args) => {
            let input: DeviceInput = read_json_file(&args.file)?;
            let device = devices::register_device(client, &input).await?;
            render_item(&device, format)
        }
        DeviceCommand::Update(args) => {
            let update: DeviceUpdate = read_json_file(&args.file)?;
            let device = devices::update_device(client, &args.id, &update).await?;
            render_item(&device, format)
        }
        DeviceCommand::Rm(args) => {
            let ack = devices::delete_device(client, &args.id).await?;
            render_ack(ack.as_ref(), "Device deleted", format)
        }
        DeviceCommand::Open(args) => {
            let route = resolve_device_route(client, &args.id).await;
            render_route(&route, format)
        }
    }
}
