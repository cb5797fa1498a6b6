//! Invoice CLI commands
//!
//! Runs the invoice workflow without a terminal UI: the list is loaded by an
//! [`InvoiceListCoordinator`] exactly as on the invoicing screen, and payment
//! dialogs are answered by [`AutoConfirmModal`].

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Subcommand, ValueEnum};

use super::modal::AutoConfirmModal;
use crate::config::Settings;
use crate::display::{format_invoice_details, format_invoice_list};
use crate::error::{InvoicePayError, InvoicePayResult};
use crate::export::{export_invoices_csv, export_invoices_json, export_invoices_yaml, InvoiceExport};
use crate::models::{InvoiceId, JournalId, Money, PaymentOutcome};
use crate::rpc::RemoteCaller;
use crate::services::InvoiceService;
use crate::workflow::{InvoiceListCoordinator, InvoicesButton, NavigationStack};

/// Output format for `invoices list`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text table
    #[default]
    Table,
    /// JSON with export metadata
    Json,
    /// YAML with export metadata
    Yaml,
    /// One CSV row per invoice
    Csv,
}

/// Invoice subcommands
#[derive(Subcommand, Debug)]
pub enum InvoiceCommands {
    /// List outstanding invoices
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show one invoice
    Show {
        /// Invoice ID
        invoice: InvoiceId,
    },
    /// Post a draft invoice
    Post {
        /// Invoice ID
        invoice: InvoiceId,
    },
    /// Register a payment for an invoice
    Pay {
        /// Invoice ID
        invoice: InvoiceId,
        /// Amount to pay (defaults to the amount due)
        #[arg(short, long)]
        amount: Option<String>,
        /// Journal ID (defaults to the first available journal)
        #[arg(short, long)]
        journal: Option<JournalId>,
    },
}

type CliCoordinator = InvoiceListCoordinator<NavigationStack, AutoConfirmModal>;

/// Press the Invoices button and load the list
async fn open_list(
    caller: Arc<dyn RemoteCaller>,
    settings: &Settings,
    modal: AutoConfirmModal,
) -> InvoicePayResult<CliCoordinator> {
    let mut navigator = NavigationStack::new();
    InvoicesButton.activate(&mut navigator);
    InvoiceListCoordinator::initialize(
        InvoiceService::new(caller),
        navigator,
        modal,
        settings.pos.context(),
    )
    .await
}

/// Handle an invoice command
pub async fn handle_invoice_command(
    caller: Arc<dyn RemoteCaller>,
    settings: &Settings,
    cmd: InvoiceCommands,
) -> InvoicePayResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        InvoiceCommands::List { format, output } => {
            let coordinator = open_list(caller, settings, AutoConfirmModal::default()).await?;
            let invoices = coordinator.invoices();

            let mut writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(io::stdout().lock()),
            };

            match format {
                OutputFormat::Table => {
                    write!(writer, "{}", format_invoice_list(invoices, currency))?;
                }
                OutputFormat::Json => {
                    let export = InvoiceExport::new(invoices.to_vec(), coordinator.context());
                    export_invoices_json(&export, &mut writer, true)?;
                    writeln!(writer)?;
                }
                OutputFormat::Yaml => {
                    let export = InvoiceExport::new(invoices.to_vec(), coordinator.context());
                    export_invoices_yaml(&export, &mut writer)?;
                }
                OutputFormat::Csv => export_invoices_csv(invoices, &mut writer)?,
            }
            writer.flush()?;

            if let Some(path) = output {
                eprintln!("Exported {} invoice(s) to {}", invoices.len(), path.display());
            }
        }

        InvoiceCommands::Show { invoice } => {
            let coordinator = open_list(caller, settings, AutoConfirmModal::default()).await?;
            let found = coordinator
                .find_invoice(invoice)
                .ok_or_else(|| InvoicePayError::invoice_not_found(invoice.get().to_string()))?;
            print!("{}", format_invoice_details(found, currency));
        }

        InvoiceCommands::Post { invoice } => {
            let mut coordinator = open_list(caller, settings, AutoConfirmModal::default()).await?;
            coordinator.confirm_invoice(invoice).await?;

            println!("Posted invoice {}", invoice.get());
            if let Some(posted) = coordinator.find_invoice(invoice) {
                println!(
                    "  {}  due {}",
                    posted.display_name(),
                    posted.amount_residual.format_with_symbol(currency)
                );
            }
        }

        InvoiceCommands::Pay {
            invoice,
            amount,
            journal,
        } => {
            let amount = amount
                .map(|text| {
                    Money::parse(&text).map_err(|e| {
                        InvoicePayError::Validation(format!(
                            "Invalid amount '{}'. Use a format like '125.50'. Error: {}",
                            text, e
                        ))
                    })
                })
                .transpose()?;

            let modal = AutoConfirmModal::new(amount, journal);
            let mut coordinator = open_list(caller, settings, modal).await?;

            match coordinator.pay_invoice(invoice).await? {
                PaymentOutcome::Registered(request) => {
                    println!(
                        "Registered payment of {} for invoice {}",
                        request.amount.format_with_symbol(currency),
                        request.invoice_id.get()
                    );
                    match request.journal_id {
                        Some(journal_id) => println!("  Journal: {}", journal_id.get()),
                        None => println!("  Journal: (none)"),
                    }
                    let remaining = coordinator.invoices().len();
                    println!("  {} invoice(s) still outstanding", remaining);
                }
                PaymentOutcome::Cancelled => println!("Payment cancelled"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfigId, SessionId};
    use crate::rpc::scripted::ScriptedRemote;
    use serde_json::json;

    fn remote() -> Arc<ScriptedRemote> {
        Arc::new(
            ScriptedRemote::new()
                .reply(
                    "get_invoices",
                    json!([{"invoice_id": 1, "name": "INV/1", "amount_total": 50, "amount_residual": 50, "state": "posted"}]),
                )
                .reply("get_journal", json!([{"id": 9, "name": "Cash"}, {"id": 11, "name": "Bank"}])),
        )
    }

    #[tokio::test]
    async fn test_pay_uses_pos_context_and_overrides() {
        let remote = remote();
        let mut settings = Settings::default();
        settings.pos.session_id = Some(SessionId::new(4));
        settings.pos.config_id = Some(ConfigId::new(2));

        handle_invoice_command(
            remote.clone(),
            &settings,
            InvoiceCommands::Pay {
                invoice: InvoiceId::new(1),
                amount: Some("20".into()),
                journal: Some(JournalId::new(11)),
            },
        )
        .await
        .unwrap();

        let payment = &remote.calls_to("pos_register_payment")[0];
        assert_eq!(payment.args, vec![json!(1), json!(11), json!(20.0), json!(4), json!(2)]);
        assert_eq!(remote.count("get_invoices"), 2);
    }

    #[tokio::test]
    async fn test_pay_rejects_bad_amount_before_any_call() {
        let remote = remote();
        let err = handle_invoice_command(
            remote.clone(),
            &Settings::default(),
            InvoiceCommands::Pay {
                invoice: InvoiceId::new(1),
                amount: Some("twelve".into()),
                journal: None,
            },
        )
        .await
        .unwrap_err();

        assert!(err.is_validation());
        assert!(remote.calls().is_empty());
    }

    #[tokio::test]
    async fn test_post_reloads() {
        let remote = remote();
        handle_invoice_command(
            remote.clone(),
            &Settings::default(),
            InvoiceCommands::Post {
                invoice: InvoiceId::new(1),
            },
        )
        .await
        .unwrap();

        let methods: Vec<_> = remote.calls().iter().map(|c| c.procedure.method).collect();
        assert_eq!(methods, vec!["get_invoices", "post_invoice", "get_invoices"]);
    }

    #[tokio::test]
    async fn test_list_exports_csv_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("invoices.csv");

        handle_invoice_command(
            remote(),
            &Settings::default(),
            InvoiceCommands::List {
                format: OutputFormat::Csv,
                output: Some(path.clone()),
            },
        )
        .await
        .unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("ID,Number"));
        assert!(text.contains("1,INV/1,"));
    }

    #[tokio::test]
    async fn test_show_unknown_invoice() {
        let err = handle_invoice_command(
            remote(),
            &Settings::default(),
            InvoiceCommands::Show {
                invoice: InvoiceId::new(9),
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
