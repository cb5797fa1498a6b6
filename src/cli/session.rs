//! POS session CLI commands

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_closing_summary, format_sale_details};
use crate::error::{InvoicePayError, InvoicePayResult};
use crate::models::{SaleDetailsScope, SessionId};
use crate::rpc::RemoteCaller;
use crate::services::SessionService;

/// Session subcommands
#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Show the invoice payments recorded for a session's closing
    Closing {
        /// Session ID (defaults to the configured session)
        #[arg(long = "session")]
        session: Option<SessionId>,
    },

    /// Show the invoices paid per session in the sale details report
    ///
    /// Without dates the report covers one session. With --from and --to it
    /// covers every session of the configured POS that ran within those days.
    Report {
        /// Session ID (defaults to the configured session)
        #[arg(long = "session", conflicts_with = "from")]
        session: Option<SessionId>,

        /// First day of the period (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        /// Last day of the period, inclusive (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
}

/// Work out which sessions a report covers
fn report_scope(
    settings: &Settings,
    session: Option<SessionId>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> InvoicePayResult<SaleDetailsScope> {
    match (from, to) {
        (Some(from), Some(to)) => {
            if from > to {
                return Err(InvoicePayError::Validation(format!(
                    "--from {} is after --to {}",
                    from, to
                )));
            }
            let config_id = settings.pos.config_id.ok_or_else(|| {
                InvoicePayError::Validation(
                    "A period report needs a POS configuration. Use --config-id".into(),
                )
            })?;
            let last_second = NaiveTime::from_hms_opt(23, 59, 59)
                .ok_or_else(|| InvoicePayError::Validation("Invalid end of day".into()))?;
            Ok(SaleDetailsScope::ConfigPeriod {
                config_ids: vec![config_id],
                start: from.and_time(NaiveTime::MIN),
                stop: to.and_time(last_second),
            })
        }
        (None, None) => {
            let session_id = session.or(settings.pos.session_id).ok_or_else(|| {
                InvoicePayError::Validation(
                    "No POS session given. Use --session, --session-id or --from/--to".into(),
                )
            })?;
            Ok(SaleDetailsScope::Sessions(vec![session_id]))
        }
        _ => Err(InvoicePayError::Validation(
            "--from and --to must be given together".into(),
        )),
    }
}

/// Handle a session command
pub async fn handle_session_command(
    caller: Arc<dyn RemoteCaller>,
    settings: &Settings,
    cmd: SessionCommands,
) -> InvoicePayResult<()> {
    let service = SessionService::new(caller);

    match cmd {
        SessionCommands::Closing { session } => {
            let session_id = session.or(settings.pos.session_id).ok_or_else(|| {
                InvoicePayError::Validation(
                    "No POS session given. Use --session or --session-id".into(),
                )
            })?;

            let summary = service.closing_summary(session_id).await?;
            print!(
                "{}",
                format_closing_summary(session_id, &summary, &settings.currency_symbol)
            );
        }
        SessionCommands::Report { session, from, to } => {
            let scope = report_scope(settings, session, from, to)?;
            let report = service.sale_details(&scope).await?;
            print!("{}", format_sale_details(&report, &settings.currency_symbol));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfigId;
    use crate::rpc::scripted::ScriptedRemote;

    fn day(text: &str) -> NaiveDate {
        text.parse().unwrap()
    }

    #[tokio::test]
    async fn test_closing_requires_a_session() {
        let remote = Arc::new(ScriptedRemote::new());
        let err = handle_session_command(
            remote.clone(),
            &Settings::default(),
            SessionCommands::Closing { session: None },
        )
        .await
        .unwrap_err();

        assert!(err.is_validation());
        assert!(remote.calls().is_empty());
    }

    #[tokio::test]
    async fn test_closing_falls_back_to_configured_session() {
        let remote = Arc::new(ScriptedRemote::new().reply(
            "get_closing_control_data",
            serde_json::json!({"invoice_paid_lines": [], "invoice_paid_total": 0}),
        ));
        let mut settings = Settings::default();
        settings.pos.session_id = Some(SessionId::new(12));

        handle_session_command(remote.clone(), &settings, SessionCommands::Closing { session: None })
            .await
            .unwrap();

        assert_eq!(
            remote.calls_to("get_closing_control_data")[0].args,
            vec![serde_json::json!([12])]
        );
    }

    #[tokio::test]
    async fn test_report_defaults_to_configured_session() {
        let remote = Arc::new(ScriptedRemote::new().reply(
            "get_sale_details",
            serde_json::json!({"invoice_paid_data": [], "invoice_paid_total": 0}),
        ));
        let mut settings = Settings::default();
        settings.pos.session_id = Some(SessionId::new(12));

        handle_session_command(
            remote.clone(),
            &settings,
            SessionCommands::Report {
                session: None,
                from: None,
                to: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(
            remote.calls_to("get_sale_details")[0].args,
            vec![
                serde_json::json!(false),
                serde_json::json!(false),
                serde_json::json!(false),
                serde_json::json!([12])
            ]
        );
    }

    #[test]
    fn test_report_period_covers_whole_days_of_the_configuration() {
        let mut settings = Settings::default();
        settings.pos.config_id = Some(ConfigId::new(2));
        settings.pos.session_id = Some(SessionId::new(12));

        let scope = report_scope(&settings, None, Some(day("2025-03-01")), Some(day("2025-03-31"))).unwrap();
        assert_eq!(
            scope.positional_args(),
            vec![
                serde_json::json!("2025-03-01 00:00:00"),
                serde_json::json!("2025-03-31 23:59:59"),
                serde_json::json!([2]),
                serde_json::json!(false)
            ]
        );
    }

    #[tokio::test]
    async fn test_report_period_requires_a_configuration() {
        let remote = Arc::new(ScriptedRemote::new());
        let err = handle_session_command(
            remote.clone(),
            &Settings::default(),
            SessionCommands::Report {
                session: None,
                from: Some(day("2025-03-01")),
                to: Some(day("2025-03-31")),
            },
        )
        .await
        .unwrap_err();

        assert!(err.is_validation());
        assert!(remote.calls().is_empty());
    }

    #[test]
    fn test_report_rejects_reversed_or_half_open_periods() {
        let mut settings = Settings::default();
        settings.pos.config_id = Some(ConfigId::new(2));

        let reversed = report_scope(&settings, None, Some(day("2025-03-31")), Some(day("2025-03-01")));
        assert!(reversed.unwrap_err().is_validation());

        let half_open = report_scope(&settings, None, Some(day("2025-03-01")), None);
        assert!(half_open.unwrap_err().is_validation());
    }
}
