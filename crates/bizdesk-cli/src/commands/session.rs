//! Local session management (`bizdesk session ...`).

use anyhow::anyhow;
use bizdesk_client::UserType;
use tracing::info;

use crate::cli::{OutputFormat, SessionCommand, SessionLoginArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::render_session;

pub(crate) fn handle(
    ctx: &AppContext,
    command: SessionCommand,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        SessionCommand::Login(args) => handle_login(ctx, args),
        SessionCommand::Logout => handle_logout(ctx),
        SessionCommand::Show => handle_show(ctx, format),
    }
}

pub(crate) fn handle_login(ctx: &AppContext, args: SessionLoginArgs) -> CliResult<()> {
    let token = args.token.trim();
    if token.is_empty() {
        return Err(CliError::validation("token must not be empty"));
    }
    let user_type = UserType::from(args.user_type);
    ctx.client
        .session()
        .sign_in(user_type, token)
        .map_err(|err| CliError::failure(anyhow!("failed to store session: {err}")))?;
    info!(user_type = user_type.as_str(), "session stored");
    println!("Signed in as {user_type}");
    Ok(())
}

pub(crate) fn handle_logout(ctx: &AppContext) -> CliResult<()> {
    ctx.client
        .session()
        .clear()
        .map_err(|err| CliError::failure(anyhow!("failed to clear session: {err}")))?;
    println!("Signed out");
    Ok(())
}

pub(crate) fn handle_show(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let snapshot = ctx
        .client
        .session()
        .snapshot()
        .map_err(|err| CliError::failure(anyhow!("failed to read session: {err}")))?;
    render_session(&snapshot, format)
}
