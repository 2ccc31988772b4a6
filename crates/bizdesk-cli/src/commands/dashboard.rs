//! Partner dashboard (`bizdesk dashboard`).

use bizdesk_client::services::dashboard;
use bizdesk_config::AppKind;

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliResult};
use crate::output::render_stats;

pub(crate) async fn handle(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    ctx.require_app(AppKind::Client, "dashboard")?;
    let stats = dashboard::dashboard_stats(&ctx.client).await?;
    render_stats(&stats, format)
}
