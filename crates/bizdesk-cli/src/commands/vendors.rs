//! Vendor management (`bizdesk vendors ...`).

use bizdesk_api_models::{VendorInput, VendorUpdate};
use bizdesk_client::services::vendors;
use bizdesk_config::AppKind;

use crate::cli::{OutputFormat, VendorCommand};
use crate::client::{AppContext, CliResult, read_json_file};
use crate::output::{render_ack, render_item, render_list};

pub(crate) async fn handle(
    ctx: &AppContext,
    command: VendorCommand,
    format: OutputFormat,
) -> CliResult<()> {
    ctx.require_app(AppKind::Client, "vendors")?;
    let client = &ctx.client;
    match command {
        VendorCommand::Ls(args) => {
            let list = vendors::list_vendors(client, &args.into()).await?;
            render_list(&list, format)
        }
        VendorCommand::Get(args) => {
            let vendor = vendors::get_vendor(client, &args.id).await?;
            render_item(&vendor, format)
        }
        VendorCommand::Create(args) => {
            let input: VendorInput = read_json_file(&args.file)?;
            let vendor = vendors::create_vendor(client, &input).await?;
            render_item(&vendor, format)
        }
        VendorCommand::Update(args) => {
            let update: VendorUpdate = read_json_file(&args.file)?;
            let vendor = vendors::update_vendor(client, &args.id, &update).await?;
            render_item(&vendor, format)
        }
        VendorCommand::Rm(args) => {
            let ack = vendors::delete_vendor(client, &args.id).await?;
            render_ack(ack.as_ref(), "Vendor deleted", format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{IdArgs, ListArgs};
    use bizdesk_client::session::{PARTNER_TOKEN_KEY, USER_TYPE_KEY};
    use bizdesk_client::{ApiClient, MemorySessionStore, SessionStore};
    use bizdesk_config::ClientConfig;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::sync::Arc;

    fn context(server: &MockServer, store: Arc<MemorySessionStore>) -> AppContext {
        let client =
            ApiClient::new(ClientConfig::new(server.base_url()), store).expect("client builds");
        AppContext {
            client,
            app: AppKind::Client,
        }
    }

    fn partner_store() -> Arc<MemorySessionStore> {
        Arc::new(MemorySessionStore::with_entries([
            (USER_TYPE_KEY, "partner"),
            (PARTNER_TOKEN_KEY, "partner-token"),
        ]))
    }

    #[tokio::test]
    async fn vendor_list_forwards_search() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/partner/vendors")
                .query_param("search", "paper")
                .query_param("limit", "5");
            then.status(200).json_body(json!({
                "data": [{"id": "v-1", "name": "Paper Co", "companyId": "c-1"}],
                "total": 1,
                "page": 1,
                "limit": 5
            }));
        });

        let args = ListArgs {
            search: Some("paper".into()),
            limit: Some(5),
            ..ListArgs::default()
        };
        handle(
            &context(&server, partner_store()),
            VendorCommand::Ls(args),
            OutputFormat::Table,
        )
        .await
        .expect("list should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn expired_session_clears_store_and_fails() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/partner/vendors/v-1");
            then.status(401).json_body(json!({"error": "TOKEN_EXPIRED"}));
        });

        let store = partner_store();
        let ctx = context(&server, store.clone());
        let mut events = ctx.client.subscribe();
        let err = handle(
            &ctx,
            VendorCommand::Get(IdArgs { id: "v-1".into() }),
            OutputFormat::Table,
        )
        .await
        .expect_err("401 fails");

        assert_eq!(err.exit_code(), 3);
        assert_eq!(store.get(PARTNER_TOKEN_KEY).expect("read"), None);
        assert!(events.try_recv().is_ok());
    }
}
