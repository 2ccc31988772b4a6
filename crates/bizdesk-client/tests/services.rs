mod support;

use anyhow::{Result, anyhow};
use bizdesk_api_models::{
    CompanyInput, DeviceUpdate, ListQuery, PartnerRegistration, TransactionFilter,
    TransactionInput, TransactionKind,
};
use bizdesk_client::services::{companies, dashboard, devices, partners, transactions, vendors};
use bizdesk_client::interceptors::DEFAULT_SERVER_MESSAGE;
use bizdesk_client::{ApiError, ErrorClass};
use httpmock::prelude::*;
use serde_json::json;
use tracing::Level;

use support::{capture_events, partner_client};

const SERVICE_TARGET: &str = "bizdesk_client::services";
const INTERCEPTOR_TARGET: &str = "bizdesk_client::interceptors";

#[tokio::test]
async fn list_companies_passes_query_and_payload_through() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/partner/companies")
            .query_param("page", "2")
            .query_param("search", "acme")
            .header("authorization", "Bearer partner-token");
        then.status(200).json_body(json!({
            "data": [{"_id": "c-1", "name": "Acme Ltd", "taxId": "GB123"}],
            "total": 11,
            "page": 2
        }));
    });

    let (client, _) = partner_client(&server)?;
    let query = ListQuery {
        page: Some(2),
        search: Some("acme".into()),
        ..ListQuery::default()
    };
    let page = companies::list_companies(&client, &query).await?;

    mock.assert();
    assert_eq!(page.total, Some(11));
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, "c-1");
    assert_eq!(page.data[0].tax_id.as_deref(), Some("GB123"));
    Ok(())
}

#[tokio::test]
async fn create_company_posts_camel_case_body() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/partner/companies")
            .json_body(json!({"name": "Acme Ltd", "taxId": "GB123"}));
        then.status(201)
            .json_body(json!({"id": "c-9", "name": "Acme Ltd", "taxId": "GB123"}));
    });

    let (client, _) = partner_client(&server)?;
    let input = CompanyInput {
        name: "Acme Ltd".into(),
        email: None,
        phone: None,
        address: None,
        tax_id: Some("GB123".into()),
    };
    let company = companies::create_company(&client, &input).await?;

    mock.assert();
    assert_eq!(company.id, "c-9");
    Ok(())
}

#[tokio::test]
async fn register_and_toggle_partner_use_admin_routes() -> Result<()> {
    let server = MockServer::start_async().await;
    let register = server.mock(|when, then| {
        when.method(POST).path("/admin/partners/register").json_body(json!({
            "name": "Northwind",
            "email": "ops@northwind.test",
            "password": "s3cret"
        }));
        then.status(201).json_body(json!({
            "_id": "p-1", "name": "Northwind", "email": "ops@northwind.test", "isActive": true
        }));
    });
    let toggle = server.mock(|when, then| {
        when.method(PATCH).path("/admin/partners/toggle/p-1");
        then.status(200).json_body(json!({
            "_id": "p-1", "name": "Northwind", "email": "ops@northwind.test", "isActive": false
        }));
    });

    let (client, _) = partner_client(&server)?;
    let created = partners::register_partner(
        &client,
        &PartnerRegistration {
            name: "Northwind".into(),
            email: "ops@northwind.test".into(),
            password: "s3cret".into(),
            phone: None,
            company_name: None,
        },
    )
    .await?;
    let toggled = partners::toggle_partner(&client, &created.id).await?;

    register.assert();
    toggle.assert();
    assert!(created.is_active);
    assert!(!toggled.is_active);
    Ok(())
}

#[tokio::test]
async fn transactions_filter_and_create() -> Result<()> {
    let server = MockServer::start_async().await;
    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/partner/transaction")
            .query_param("companyId", "c-1")
            .query_param("type", "credit");
        then.status(200).json_body(json!({
            "data": [{"_id": "t-1", "amount": 40.0, "type": "credit", "companyId": "c-1"}]
        }));
    });
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/partner/transaction")
            .json_body(json!({"amount": 12.5, "type": "debit", "vendorId": "v-1"}));
        then.status(201)
            .json_body(json!({"_id": "t-2", "amount": 12.5, "type": "debit", "vendorId": "v-1"}));
    });

    let (client, _) = partner_client(&server)?;
    let filter = TransactionFilter {
        company_id: Some("c-1".into()),
        kind: Some(TransactionKind::Credit),
        ..TransactionFilter::default()
    };
    let page = transactions::list_transactions(&client, &filter).await?;
    let recorded = transactions::create_transaction(
        &client,
        &TransactionInput {
            amount: 12.5,
            kind: TransactionKind::Debit,
            currency: None,
            company_id: None,
            vendor_id: Some("v-1".into()),
            device_id: None,
            description: None,
        },
    )
    .await?;

    list.assert();
    create.assert();
    assert_eq!(page.data[0].kind, TransactionKind::Credit);
    assert_eq!(recorded.id, "t-2");
    Ok(())
}

#[tokio::test]
async fn dashboard_stats_and_device_update() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/partner/dashboard/stats");
        then.status(200).json_body(json!({
            "totalCompanies": 4,
            "totalDevices": 2,
            "totalCredit": 150.5
        }));
    });
    let update = server.mock(|when, then| {
        when.method(PATCH)
            .path("/partner/devices/d-7")
            .json_body(json!({"status": "retired"}));
        then.status(200)
            .json_body(json!({"_id": "d-7", "name": "Till 2", "status": "retired"}));
    });

    let (client, _) = partner_client(&server)?;
    let stats = dashboard::dashboard_stats(&client).await?;
    let device = devices::update_device(
        &client,
        "d-7",
        &DeviceUpdate {
            status: Some("retired".into()),
            ..DeviceUpdate::default()
        },
    )
    .await?;

    update.assert();
    assert_eq!(stats.total_companies, 4);
    assert_eq!(stats.total_vendors, 0);
    assert_eq!(device.status.as_deref(), Some("retired"));
    Ok(())
}

#[tokio::test]
async fn delete_accepts_empty_acknowledgement() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/partner/vendors/v-3");
        then.status(204);
    });

    let (client, _) = partner_client(&server)?;
    let ack = vendors::delete_vendor(&client, "v-3").await?;

    mock.assert();
    assert!(ack.is_none());
    Ok(())
}

#[tokio::test]
async fn failure_logs_once_and_returns_original_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/partner/vendors/missing");
        then.status(404)
            .json_body(json!({"error": "NOT_FOUND", "message": "vendor not found"}));
    });

    let (client, store) = partner_client(&server)?;
    let (events, _guard) = capture_events();
    let err = vendors::get_vendor(&client, "missing")
        .await
        .expect_err("404 must reject");

    match &err {
        ApiError::Status { path, status, body, .. } => {
            assert_eq!(path, "/partner/vendors/missing");
            assert_eq!(status.as_u16(), 404);
            assert_eq!(body.error.as_deref(), Some("NOT_FOUND"));
            assert_eq!(body.message.as_deref(), Some("vendor not found"));
        }
        other => return Err(anyhow!("unexpected error: {other:?}")),
    }
    assert_eq!(err.class(), ErrorClass::Other);
    assert_eq!(events.count(Level::ERROR, SERVICE_TARGET), 1);
    assert_eq!(store.len(), 3);
    Ok(())
}

#[tokio::test]
async fn server_fault_is_logged_by_interceptor_and_service() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/partner/devices");
        then.status(500).json_body(json!({"message": "database unavailable"}));
    });

    let (client, _) = partner_client(&server)?;
    let (events, _guard) = capture_events();
    let err = devices::list_devices(&client, &ListQuery::default())
        .await
        .expect_err("500 must reject");

    assert_eq!(err.class(), ErrorClass::ServerFault);
    assert_eq!(err.server_message(), Some("database unavailable"));
    let logged = events.matching(Level::ERROR, INTERCEPTOR_TARGET);
    assert_eq!(logged.len(), 1);
    assert_eq!(
        logged[0].fields.get("message").map(String::as_str),
        Some("database unavailable")
    );
    assert_eq!(events.count(Level::ERROR, SERVICE_TARGET), 1);
    Ok(())
}

#[tokio::test]
async fn forbidden_warns_once_and_returns_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/partner/companies/c-9");
        then.status(403).json_body(json!({"message": "not your company"}));
    });

    let (client, store) = partner_client(&server)?;
    let (events, _guard) = capture_events();
    let err = companies::get_company(&client, "c-9")
        .await
        .expect_err("403 must reject");

    assert_eq!(err.class(), ErrorClass::Forbidden);
    assert_eq!(err.status().map(|status| status.as_u16()), Some(403));
    let warnings = events.matching(Level::WARN, INTERCEPTOR_TARGET);
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].fields.get("path").map(String::as_str),
        Some("/partner/companies/c-9")
    );
    assert_eq!(events.count(Level::ERROR, INTERCEPTOR_TARGET), 0);
    assert_eq!(store.len(), 3);
    Ok(())
}

#[tokio::test]
async fn server_fault_without_message_logs_default() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/partner/dashboard/stats");
        then.status(503);
    });

    let (client, _) = partner_client(&server)?;
    let (events, _guard) = capture_events();
    let err = dashboard::dashboard_stats(&client)
        .await
        .expect_err("503 must reject");

    assert_eq!(err.class(), ErrorClass::ServerFault);
    assert_eq!(err.server_message(), None);
    let logged = events.matching(Level::ERROR, INTERCEPTOR_TARGET);
    assert_eq!(logged.len(), 1);
    assert_eq!(
        logged[0].fields.get("message").map(String::as_str),
        Some(DEFAULT_SERVER_MESSAGE)
    );
    assert_eq!(logged[0].fields.get("status").map(String::as_str), Some("503"));
    Ok(())
}

#[tokio::test]
async fn rejected_token_clears_session_through_service_call() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/partner/companies/c-1");
        then.status(401).json_body(json!({"error": "INVALID_TOKEN"}));
    });

    let (client, store) = partner_client(&server)?;
    let mut session_events = client.subscribe();
    let err = companies::get_company(&client, "c-1")
        .await
        .expect_err("401 must reject");

    assert_eq!(err.status().map(|status| status.as_u16()), Some(401));
    assert!(store.is_empty());
    assert!(session_events.try_recv().is_ok());
    Ok(())
}
