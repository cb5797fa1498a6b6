//! Invoice payments in the POS sale details report
//!
//! The sale details report of one or more sessions carries two extra fields:
//! `invoice_paid_data`, one entry per session with invoice payments, and
//! `invoice_paid_total` across all of them. Only those are decoded here; the
//! rest of the report is ignored.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::fields::optional_text;
use super::ids::{ConfigId, SessionId};
use super::money::Money;

/// Date-time layout the server expects for report bounds
const SERVER_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Which sessions the report covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleDetailsScope {
    /// These sessions, whatever their dates
    Sessions(Vec<SessionId>),
    /// Sessions of these configurations that started and stopped within the period
    ConfigPeriod {
        config_ids: Vec<ConfigId>,
        start: NaiveDateTime,
        stop: NaiveDateTime,
    },
}

impl SaleDetailsScope {
    /// `date_start, date_stop, config_ids, session_ids`, unused ones `false`
    pub fn positional_args(&self) -> Vec<Value> {
        match self {
            Self::Sessions(session_ids) => vec![
                Value::Bool(false),
                Value::Bool(false),
                Value::Bool(false),
                json!(session_ids),
            ],
            Self::ConfigPeriod {
                config_ids,
                start,
                stop,
            } => vec![
                json!(start.format(SERVER_DATETIME).to_string()),
                json!(stop.format(SERVER_DATETIME).to_string()),
                json!(config_ids),
                Value::Bool(false),
            ],
        }
    }
}

/// One invoice paid during a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPaidLine {
    #[serde(default, deserialize_with = "optional_text")]
    pub name: Option<String>,
    pub amount: Money,
}

/// Invoice payments of one session, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInvoicePayments {
    pub session_name: String,
    #[serde(default)]
    pub lines: Vec<SessionPaidLine>,
    pub total: Money,
}

/// Invoice payments across the sessions of a sale details report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleDetailsInvoices {
    #[serde(default)]
    pub invoice_paid_data: Vec<SessionInvoicePayments>,
    #[serde(default)]
    pub invoice_paid_total: Money,
}

impl SaleDetailsInvoices {
    pub fn is_empty(&self) -> bool {
        self.invoice_paid_data.is_empty()
    }

    /// Number of paid invoices over all sessions
    pub fn line_count(&self) -> usize {
        self.invoice_paid_data
            .iter()
            .map(|session| session.lines.len())
            .sum()
    }
}
