//! Invoice service
//!
//! Typed access to the invoice procedures on `account.move` and the journal
//! lookup on `account.journal`.

use std::sync::Arc;

use tracing::{debug, info};

use super::decode;
use crate::error::InvoicePayResult;
use crate::models::{Invoice, InvoiceId, Journal, PaymentRequest};
use crate::rpc::procedure::{GET_INVOICES, GET_JOURNAL, POST_INVOICE, POS_REGISTER_PAYMENT};
use crate::rpc::{ProcedureCall, RemoteCaller};

/// Service for invoice listing, posting and payment registration
#[derive(Clone)]
pub struct InvoiceService {
    caller: Arc<dyn RemoteCaller>,
}

impl InvoiceService {
    /// Create a new invoice service
    pub fn new(caller: Arc<dyn RemoteCaller>) -> Self {
        Self { caller }
    }

    /// Fetch the outstanding invoices, in the order the server returns them
    pub async fn get_invoices(&self) -> InvoicePayResult<Vec<Invoice>> {
        let value = self.caller.call(ProcedureCall::new(GET_INVOICES)).await?;
        let invoices: Vec<Invoice> = decode(GET_INVOICES, value)?;
        debug!(count = invoices.len(), "fetched invoices");
        Ok(invoices)
    }

    /// Post a draft invoice
    ///
    /// The server's answer carries nothing the client uses and is discarded.
    pub async fn post_invoice(&self, invoice_id: InvoiceId) -> InvoicePayResult<()> {
        let call = ProcedureCall::new(POST_INVOICE).with_args(vec![invoice_id.get().into()]);
        self.caller.call(call).await?;
        info!(%invoice_id, "invoice posted");
        Ok(())
    }

    /// Register a payment from the point of sale
    pub async fn register_payment(&self, request: &PaymentRequest) -> InvoicePayResult<()> {
        let call = ProcedureCall::new(POS_REGISTER_PAYMENT)
            .with_args(request.positional_args())
            .with_context("from_pos", true);
        self.caller.call(call).await?;
        info!(
            invoice_id = %request.invoice_id,
            amount = %request.amount,
            journal_id = ?request.journal_id.map(|id| id.get()),
            "payment registered"
        );
        Ok(())
    }

    /// Fetch the journals a payment can be recorded through
    pub async fn get_journals(&self) -> InvoicePayResult<Vec<Journal>> {
        let value = self.caller.call(ProcedureCall::new(GET_JOURNAL)).await?;
        decode(GET_JOURNAL, value)
    }
}
