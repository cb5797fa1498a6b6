//! Non-interactive payment dialog host
//!
//! Used by `invoices pay`: the dialog keeps its defaults (the residual amount
//! and the first journal) unless overridden on the command line, and is then
//! confirmed straight away.

use async_trait::async_trait;
use tracing::debug;

use crate::error::InvoicePayResult;
use crate::models::{JournalId, Money};
use crate::workflow::{ModalHost, PaymentRegistrationDialog};

/// Applies command-line overrides to a dialog and confirms it
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirmModal {
    pub amount: Option<Money>,
    pub journal_id: Option<JournalId>,
}

impl AutoConfirmModal {
    pub fn new(amount: Option<Money>, journal_id: Option<JournalId>) -> Self {
        Self { amount, journal_id }
    }
}

#[async_trait]
impl ModalHost for AutoConfirmModal {
    async fn present(&mut self, mut dialog: PaymentRegistrationDialog) -> InvoicePayResult<()> {
        if let Some(amount) = self.amount {
            dialog.set_amount(amount);
        }
        if let Some(journal_id) = self.journal_id {
            // An unknown journal drops the dialog, which cancels the payment
            dialog.select_journal(journal_id)?;
        }
        debug!(
            amount = %dialog.amount(),
            journal = ?dialog.selected_journal().map(|journal| journal.name.as_str()),
            "confirming payment dialog"
        );
        dialog.confirm()?;
        Ok(())
    }
}
