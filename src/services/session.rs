//! POS session service

use std::sync::Arc;

use tracing::debug;

use super::decode;
use crate::error::InvoicePayResult;
use crate::models::{ClosingInvoiceSummary, SaleDetailsInvoices, SaleDetailsScope, SessionId};
use crate::rpc::procedure::{GET_CLOSING_CONTROL_DATA, GET_SALE_DETAILS};
use crate::rpc::{ProcedureCall, RemoteCaller};

/// Service for point-of-sale session data
#[derive(Clone)]
pub struct SessionService {
    caller: Arc<dyn RemoteCaller>,
}

impl SessionService {
    pub fn new(caller: Arc<dyn RemoteCaller>) -> Self {
        Self { caller }
    }

    /// Invoice payments logged against a session, taken from its closing data
    pub async fn closing_summary(&self, session_id: SessionId) -> InvoicePayResult<ClosingInvoiceSummary> {
        let call = ProcedureCall::new(GET_CLOSING_CONTROL_DATA)
            .with_args(vec![serde_json::json!([session_id.get()])]);
        let value = self.caller.call(call).await?;
        let summary: ClosingInvoiceSummary = decode(GET_CLOSING_CONTROL_DATA, value)?;
        debug!(%session_id, lines = summary.invoice_paid_lines.len(), "fetched closing summary");
        Ok(summary)
    }

    /// Invoice payments per session from the sale details report
    pub async fn sale_details(&self, scope: &SaleDetailsScope) -> InvoicePayResult<SaleDetailsInvoices> {
        let call = ProcedureCall::new(GET_SALE_DETAILS).with_args(scope.positional_args());
        let value = self.caller.call(call).await?;
        let report: SaleDetailsInvoices = decode(GET_SALE_DETAILS, value)?;
        debug!(
            sessions = report.invoice_paid_data.len(),
            lines = report.line_count(),
            "fetched sale details"
        );
        Ok(report)
    }
}
