//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use bizdesk_api_models::{
    Company, DashboardStats, Device, ListResponse, MessageResponse, Partner, Transaction, Vendor,
};
use bizdesk_client::DeviceRoute;
use bizdesk_client::session::SessionSnapshot;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// Resource that renders as one line of a table and as a key/value detail view.
pub(crate) trait Tabular {
    /// Column header line matching [`Tabular::row`].
    fn header() -> String;
    /// Single table row.
    fn row(&self) -> String;
    /// Labelled fields for the detail view.
    fn fields(&self) -> Vec<(&'static str, String)>;
}

pub(crate) fn render_json<T>(value: &T) -> CliResult<()>
where
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

pub(crate) fn render_list<T>(list: &ListResponse<T>, format: OutputFormat) -> CliResult<()>
where
    T: Tabular + Serialize,
{
    match format {
        OutputFormat::Json => render_json(list)?,
        OutputFormat::Table => {
            println!("{}", T::header());
            for item in &list.data {
                println!("{}", item.row());
            }
            if let Some(footer) = page_footer(list) {
                println!("{footer}");
            }
        }
    }
    Ok(())
}

pub(crate) fn render_item<T>(item: &T, format: OutputFormat) -> CliResult<()>
where
    T: Tabular + Serialize,
{
    match format {
        OutputFormat::Json => render_json(item)?,
        OutputFormat::Table => {
            for (label, value) in item.fields() {
                println!("{label}: {value}");
            }
        }
    }
    Ok(())
}

pub(crate) fn render_ack(
    ack: Option<&MessageResponse>,
    fallback: &str,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(&ack)?,
        OutputFormat::Table => {
            let message = ack
                .and_then(|ack| ack.message.as_deref())
                .unwrap_or(fallback);
            println!("{message}");
        }
    }
    Ok(())
}

pub(crate) fn render_stats(stats: &DashboardStats, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(stats)?,
        OutputFormat::Table => {
            println!("companies: {}", stats.total_companies);
            println!("vendors: {}", stats.total_vendors);
            println!("devices: {}", stats.total_devices);
            println!("transactions: {}", stats.total_transactions);
            println!("credit: {:.2}", stats.total_credit);
            println!("debit: {:.2}", stats.total_debit);
            println!("net: {:.2}", stats.total_credit - stats.total_debit);
        }
    }
    Ok(())
}

pub(crate) fn render_route(route: &DeviceRoute, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(&serde_json::json!({
            "target": route.target,
            "authorized": route.outcome.is_authorized(),
            "outcome": format!("{:?}", route.outcome),
        }))?,
        OutputFormat::Table => {
            println!("{}", route.target);
        }
    }
    Ok(())
}

pub(crate) fn render_session(snapshot: &SessionSnapshot, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => render_json(&serde_json::json!({
            "userType": snapshot.user_type.as_str(),
            "hasUserType": snapshot.has_user_type,
            "hasPartnerToken": snapshot.has_partner_token,
            "hasEmployeeToken": snapshot.has_employee_token,
            "authenticated": snapshot.is_authenticated(),
        }))?,
        OutputFormat::Table => {
            println!("user type: {}", snapshot.user_type);
            println!("partner token: {}", present(snapshot.has_partner_token));
            println!("employee token: {}", present(snapshot.has_employee_token));
            println!(
                "status: {}",
                if snapshot.is_authenticated() {
                    "signed in"
                } else {
                    "signed out"
                }
            );
        }
    }
    Ok(())
}

fn page_footer<T>(list: &ListResponse<T>) -> Option<String> {
    let total = list.total?;
    Some(match (list.page, list.limit) {
        (Some(page), Some(limit)) => format!("page {page} ({limit} per page), {total} total"),
        (Some(page), None) => format!("page {page}, {total} total"),
        _ => format!("{total} total"),
    })
}

const fn present(flag: bool) -> &'static str {
    if flag { "stored" } else { "absent" }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn optional_field(value: Option<&str>) -> String {
    or_dash(value).to_string()
}

impl Tabular for Partner {
    fn header() -> String {
        format!("{:<26} {:<8} {:<32} NAME", "ID", "ACTIVE", "EMAIL")
    }

    fn row(&self) -> String {
        format!(
            "{:<26} {:<8} {:<32} {}",
            self.id,
            if self.is_active { "yes" } else { "no" },
            self.email,
            self.name
        )
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone", optional_field(self.phone.as_deref())),
            ("company", optional_field(self.company_name.as_deref())),
            ("active", self.is_active.to_string()),
        ]
    }
}

impl Tabular for Company {
    fn header() -> String {
        format!("{:<26} {:<16} NAME", "ID", "TAX ID")
    }

    fn row(&self) -> String {
        format!(
            "{:<26} {:<16} {}",
            self.id,
            or_dash(self.tax_id.as_deref()),
            self.name
        )
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("name", self.name.clone()),
            ("email", optional_field(self.email.as_deref())),
            ("phone", optional_field(self.phone.as_deref())),
            ("address", optional_field(self.address.as_deref())),
            ("tax id", optional_field(self.tax_id.as_deref())),
        ]
    }
}

impl Tabular for Vendor {
    fn header() -> String {
        format!("{:<26} {:<26} NAME", "ID", "COMPANY")
    }

    fn row(&self) -> String {
        format!(
            "{:<26} {:<26} {}",
            self.id,
            or_dash(self.company_id.as_deref()),
            self.name
        )
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("name", self.name.clone()),
            ("email", optional_field(self.email.as_deref())),
            ("phone", optional_field(self.phone.as_deref())),
            ("address", optional_field(self.address.as_deref())),
            ("company", optional_field(self.company_id.as_deref())),
        ]
    }
}

impl Tabular for Device {
    fn header() -> String {
        format!("{:<26} {:<12} {:<20} NAME", "ID", "STATUS", "SERIAL")
    }

    fn row(&self) -> String {
        format!(
            "{:<26} {:<12} {:<20} {}",
            self.id,
            or_dash(self.status.as_deref()),
            or_dash(self.serial_number.as_deref()),
            self.name
        )
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id.clone()),
            ("name", self.name.clone()),
            ("serial", optional_field(self.serial_number.as_deref())),
            ("status", optional_field(self.status.as_deref())),
            ("company", optional_field(self.company_id.as_deref())),
            (
                "last seen",
                self.last_seen_at
                    .map_or_else(|| "-".to_string(), |at| at.to_rfc3339()),
            ),
        ]
    }
}

impl Tabular for Transaction {
    fn header() -> String {
        format!("{:<26} {:<6} {:>12} {:<26} DESCRIPTION", "ID", "TYPE", "AMOUNT", "COMPANY")
    }

    fn row(&self) -> String {
        format!(
            "{:<26} {:<6} {:>12.2} {:<26} {}",
            self.id,
            self.kind.as_str(),
            self.amount,
            or_dash(self.company_id.as_deref()),
            or_dash(self.description.as_deref())
        )
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let amount = self.currency.as_deref().map_or_else(
            || format!("{:.2}", self.amount),
            |currency| format!("{:.2} {currency}", self.amount),
        );
        vec![
            ("id", self.id.clone()),
            ("type", self.kind.as_str().to_string()),
            ("amount", amount),
            ("status", optional_field(self.status.as_deref())),
            ("company", optional_field(self.company_id.as_deref())),
            ("vendor", optional_field(self.vendor_id.as_deref())),
            ("device", optional_field(self.device_id.as_deref())),
            ("description", optional_field(self.description.as_deref())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdesk_api_models::TransactionKind;

    fn company(id: &str) -> Company {
        Company {
            id: id.into(),
            name: "Acme Ltd".into(),
            email: None,
            phone: None,
            address: None,
            tax_id: None,
            created_at: None,
        }
    }

    #[test]
    fn missing_optional_columns_render_as_dash() {
        let row = company("c-1").row();
        assert!(row.starts_with("c-1"));
        assert!(row.contains(" - "));
        assert!(row.ends_with("Acme Ltd"));
    }

    #[test]
    fn footer_reports_paging_when_known() {
        let list = ListResponse {
            data: vec![company("c-1")],
            total: Some(41),
            page: Some(3),
            limit: Some(20),
        };
        assert_eq!(
            page_footer(&list).as_deref(),
            Some("page 3 (20 per page), 41 total")
        );

        let unpaged = ListResponse {
            data: vec![company("c-1")],
            total: None,
            page: Some(1),
            limit: None,
        };
        assert!(page_footer(&unpaged).is_none());
    }

    #[test]
    fn transaction_amount_carries_currency() {
        let transaction = Transaction {
            id: "t-1".into(),
            amount: 9.5,
            kind: TransactionKind::Credit,
            currency: Some("EUR".into()),
            status: None,
            company_id: None,
            vendor_id: None,
            device_id: None,
            description: None,
            created_at: None,
        };
        let fields = transaction.fields();
        assert!(fields.contains(&("amount", "9.50 EUR".to_string())));
        assert!(transaction.row().contains("credit"));
    }

    #[test]
    fn renderers_accept_both_formats() {
        let list = ListResponse {
            data: vec![company("c-1")],
            total: Some(1),
            page: None,
            limit: None,
        };
        for format in [OutputFormat::Table, OutputFormat::Json] {
            assert!(render_list(&list, format).is_ok());
            assert!(render_item(&list.data[0], format).is_ok());
            assert!(render_ack(None, "Company deleted", format).is_ok());
        }
    }
}
