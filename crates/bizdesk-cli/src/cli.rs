//! Argument parsing and command dispatch.

use std::path::PathBuf;
use std::time::Duration;

use bizdesk_api_models::{ListQuery, TransactionFilter, TransactionKind};
use bizdesk_client::{SessionEvent, UserType};
use bizdesk_config::defaults::{ENV_API_URL, ENV_APP, ENV_CLIENT_MODE, ENV_HTTP_TIMEOUT_SECS};
use bizdesk_config::loader::parse_timeout_secs;
use bizdesk_config::{AppKind, ClientMode, ConfigError};
use bizdesk_telemetry::{
    DEFAULT_LOG_LEVEL, LoggingConfig, build_sha, init_logging, log_format_from_label,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::client::{AppContext, CliDependencies, CliResult};
use crate::commands::{companies, dashboard, devices, partners, session, transactions, vendors};

const DEFAULT_TIMEOUT_SECS: &str = "10";

/// Parses CLI arguments, executes the requested command, and reports any
/// forced logout. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: log_format_from_label(cli.log_format.as_deref()),
        build_sha: option_env!("BIZDESK_BUILD_SHA").unwrap_or("dev"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    let trace_id = Uuid::new_v4().to_string();
    let deps = match CliDependencies::from_cli(&cli, &trace_id) {
        Ok(deps) => deps,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            return err.exit_code();
        }
    };
    tracing::debug!(
        trace_id = %trace_id,
        app = cli.app.as_str(),
        build_sha = build_sha(),
        "dispatching command"
    );

    let ctx = AppContext {
        client: deps.client,
        app: cli.app,
    };
    let mut session_events = ctx.client.subscribe();
    let result = dispatch(&ctx, cli.command, cli.output).await;
    report_session_events(&mut session_events);

    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

pub(crate) async fn dispatch(
    ctx: &AppContext,
    command: Command,
    output: OutputFormat,
) -> CliResult<()> {
    match command {
        Command::Session(command) => session::handle(ctx, command, output),
        Command::Partners(command) => partners::handle(ctx, command, output).await,
        Command::Companies(command) => companies::handle(ctx, command, output).await,
        Command::Vendors(command) => vendors::handle(ctx, command, output).await,
        Command::Transactions(command) => transactions::handle(ctx, command, output).await,
        Command::Dashboard => dashboard::handle(ctx, output).await,
        Command::Devices(command) => devices::handle(ctx, command, output).await,
    }
}

fn report_session_events(events: &mut broadcast::Receiver<SessionEvent>) {
    while let Ok(SessionEvent::Invalidated {
        reason,
        redirect_to,
    }) = events.try_recv()
    {
        eprintln!(
            "session ended by the server ({}); sign in again with `bizdesk session login` (app route {redirect_to})",
            reason.as_str()
        );
    }
}

fn parse_app(value: &str) -> Result<AppKind, ConfigError> {
    value.parse()
}

fn parse_client_mode(value: &str) -> Result<ClientMode, ConfigError> {
    value.parse()
}

#[derive(Parser)]
#[command(name = "bizdesk", about = "Command-line client for the Bizdesk platform")]
pub(crate) struct Cli {
    #[arg(long, global = true, env = ENV_API_URL, default_value = "")]
    pub(crate) api_url: String,
    #[arg(
        long,
        global = true,
        env = ENV_APP,
        value_parser = parse_app,
        default_value = "client",
        help = "Front end to act as: admin or client"
    )]
    pub(crate) app: AppKind,
    #[arg(
        long,
        global = true,
        env = ENV_CLIENT_MODE,
        value_parser = parse_client_mode,
        default_value = "interactive"
    )]
    pub(crate) mode: ClientMode,
    #[arg(long, global = true, env = "BIZDESK_SESSION_FILE")]
    pub(crate) session_file: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = ENV_HTTP_TIMEOUT_SECS,
        value_parser = parse_timeout_secs,
        default_value = DEFAULT_TIMEOUT_SECS,
        help = "Request timeout in whole seconds, at least 1"
    )]
    pub(crate) timeout: Duration,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(long, global = true, env = "BIZDESK_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub(crate) log_level: String,
    #[arg(long, global = true, env = "BIZDESK_LOG_FORMAT")]
    pub(crate) log_format: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    #[command(subcommand)]
    Session(SessionCommand),
    #[command(subcommand)]
    Partners(PartnerCommand),
    #[command(subcommand)]
    Companies(CompanyCommand),
    #[command(subcommand)]
    Vendors(VendorCommand),
    #[command(subcommand)]
    Transactions(TransactionCommand),
    Dashboard,
    #[command(subcommand)]
    Devices(DeviceCommand),
}

#[derive(Subcommand)]
pub(crate) enum SessionCommand {
    Login(SessionLoginArgs),
    Logout,
    Show,
}

#[derive(Subcommand)]
pub(crate) enum PartnerCommand {
    Register(PayloadArgs),
    Ls(ListArgs),
    Get(IdArgs),
    Update(UpdateArgs),
    Toggle(IdArgs),
    Rm(IdArgs),
}

#[derive(Subcommand)]
pub(crate) enum CompanyCommand {
    Ls(ListArgs),
    Get(IdArgs),
    Create(PayloadArgs),
    Update(UpdateArgs),
    Rm(IdArgs),
}

#[derive(Subcommand)]
pub(crate) enum VendorCommand {
    Ls(ListArgs),
    Get(IdArgs),
    Create(PayloadArgs),
    Update(UpdateArgs),
    Rm(IdArgs),
}

#[derive(Subcommand)]
pub(crate) enum TransactionCommand {
    Ls(TransactionListArgs),
    Get(IdArgs),
    Create(PayloadArgs),
}

#[derive(Subcommand)]
pub(crate) enum DeviceCommand {
    Ls(ListArgs),
    Get(IdArgs),
    Register(PayloadArgs),
    Update(UpdateArgs),
    Rm(IdArgs),
    /// Resolve the view a scanned device QR code opens.
    Open(IdArgs),
}

#[derive(Args)]
pub(crate) struct SessionLoginArgs {
    #[arg(long, value_enum, default_value_t = UserTypeArg::Partner)]
    pub(crate) user_type: UserTypeArg,
    #[arg(long, env = "BIZDESK_TOKEN", hide_env_values = true)]
    pub(crate) token: String,
}

#[derive(Args, Default)]
pub(crate) struct ListArgs {
    #[arg(long)]
    pub(crate) page: Option<u32>,
    #[arg(long)]
    pub(crate) limit: Option<u32>,
    #[arg(long)]
    pub(crate) search: Option<String>,
    #[arg(long)]
    pub(crate) status: Option<String>,
}

impl From<ListArgs> for ListQuery {
    fn from(args: ListArgs) -> Self {
        Self {
            page: args.page,
            limit: args.limit,
            search: args.search,
            status: args.status,
        }
    }
}

#[derive(Args, Default)]
pub(crate) struct TransactionListArgs {
    #[arg(long)]
    pub(crate) page: Option<u32>,
    #[arg(long)]
    pub(crate) limit: Option<u32>,
    #[arg(long = "company")]
    pub(crate) company_id: Option<String>,
    #[arg(long = "vendor")]
    pub(crate) vendor_id: Option<String>,
    #[arg(long = "device")]
    pub(crate) device_id: Option<String>,
    #[arg(long = "type", value_enum)]
    pub(crate) kind: Option<KindArg>,
    #[arg(long)]
    pub(crate) from: Option<String>,
    #[arg(long)]
    pub(crate) to: Option<String>,
}

impl From<TransactionListArgs> for TransactionFilter {
    fn from(args: TransactionListArgs) -> Self {
        Self {
            page: args.page,
            limit: args.limit,
            company_id: args.company_id,
            vendor_id: args.vendor_id,
            device_id: args.device_id,
            kind: args.kind.map(TransactionKind::from),
            from: args.from,
            to: args.to,
        }
    }
}

#[derive(Args)]
pub(crate) struct IdArgs {
    pub(crate) id: String,
}

#[derive(Args)]
pub(crate) struct PayloadArgs {
    /// JSON document holding the request body.
    #[arg(long)]
    pub(crate) file: PathBuf,
}

#[derive(Args)]
pub(crate) struct UpdateArgs {
    pub(crate) id: String,
    /// JSON document holding the fields to change.
    #[arg(long)]
    pub(crate) file: PathBuf,
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum UserTypeArg {
    Partner,
    Employee,
    Admin,
}

impl From<UserTypeArg> for UserType {
    fn from(value: UserTypeArg) -> Self {
        match value {
            UserTypeArg::Partner => Self::Partner,
            UserTypeArg::Employee => Self::Employee,
            UserTypeArg::Admin => Self::Admin,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum KindArg {
    Credit,
    Debit,
}

impl From<KindArg> for TransactionKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Credit => Self::Credit,
            KindArg::Debit => Self::Debit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bizdesk",
            "partners",
            "ls",
            "--page",
            "2",
            "--app",
            "admin",
            "--api-url",
            "http://api.test",
            "--output",
            "json",
        ])
        .expect("arguments parse");
        assert_eq!(cli.app, AppKind::Admin);
        assert_eq!(cli.api_url, "http://api.test");
        assert!(matches!(cli.output, OutputFormat::Json));
        match cli.command {
            Command::Partners(PartnerCommand::Ls(args)) => assert_eq!(args.page, Some(2)),
            _ => panic!("expected partners ls"),
        }
    }

    #[test]
    fn unknown_app_is_rejected() {
        let result = Cli::try_parse_from(["bizdesk", "--app", "kiosk", "dashboard"]);
        assert!(result.is_err());
    }

    #[test]
    fn timeout_must_be_positive() {
        let zero = Cli::try_parse_from(["bizdesk", "--timeout", "0", "dashboard"]);
        assert!(zero.is_err());

        let cli = Cli::try_parse_from(["bizdesk", "--timeout", "3", "dashboard"])
            .expect("arguments parse");
        assert_eq!(cli.timeout, Duration::from_secs(3));
        let defaulted = Cli::try_parse_from(["bizdesk", "dashboard"]).expect("arguments parse");
        assert_eq!(defaulted.timeout, Duration::from_secs(10));
    }

    #[test]
    fn transaction_args_map_to_filter() {
        let filter = TransactionFilter::from(TransactionListArgs {
            company_id: Some("c-1".into()),
            kind: Some(KindArg::Debit),
            ..TransactionListArgs::default()
        });
        assert_eq!(filter.company_id.as_deref(), Some("c-1"));
        assert_eq!(filter.kind, Some(TransactionKind::Debit));
        assert!(filter.vendor_id.is_none());
    }
}
