//! Payment registration dialog
//!
//! Collects the amount and journal for one invoice. Opening a dialog yields
//! the dialog itself, which the modal host edits and finally confirms or
//! cancels, and a [`DialogHandle`] the opener awaits for the outcome.
//!
//! ```text
//! Loading --initialize--> Ready --confirm--> Confirmed
//!    |                      |
//!    +------cancel----------+--cancel----> Cancelled
//! ```
//!
//! `confirm` and `cancel` take the dialog by value, so a resolved dialog can
//! no longer be edited or resolved again. Dropping an unresolved dialog
//! resolves its handle as cancelled.

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::error::{InvoicePayError, InvoicePayResult};
use crate::models::{DialogResult, Invoice, Journal, JournalId, Money};
use crate::services::InvoiceService;

/// Lifecycle state of an open dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// Journals are being fetched
    Loading,
    /// Journals are loaded; the dialog can be confirmed
    Ready,
}

/// The dialog's view of one invoice payment
#[derive(Debug)]
pub struct PaymentRegistrationDialog {
    invoice: Invoice,
    amount: Money,
    journal_id: Option<JournalId>,
    journals: Vec<Journal>,
    state: DialogState,
    resolver: oneshot::Sender<DialogResult>,
}

/// Awaitable outcome of a dialog
#[derive(Debug)]
pub struct DialogHandle {
    receiver: oneshot::Receiver<DialogResult>,
}

impl DialogHandle {
    /// Wait for the dialog to be confirmed, cancelled or dropped
    pub async fn result(self) -> DialogResult {
        self.receiver.await.unwrap_or(DialogResult::Cancelled)
    }
}

/// Presents dialogs to the user
///
/// `present` hands the dialog over and returns once the host owns it; the
/// outcome arrives through the [`DialogHandle`] the opener kept.
#[async_trait]
pub trait ModalHost: Send {
    async fn present(&mut self, dialog: PaymentRegistrationDialog) -> InvoicePayResult<()>;
}

impl PaymentRegistrationDialog {
    /// Open a dialog for an invoice, amount prefilled with its residual
    pub fn open(invoice: Invoice) -> (Self, DialogHandle) {
        let (resolver, receiver) = oneshot::channel();
        let dialog = Self {
            amount: invoice.amount_residual,
            invoice,
            journal_id: None,
            journals: Vec::new(),
            state: DialogState::Loading,
            resolver,
        };
        (dialog, DialogHandle { receiver })
    }

    /// Load the journal options and preselect the first one
    pub async fn initialize(&mut self, service: &InvoiceService) -> InvoicePayResult<()> {
        let journals = service.get_journals().await?;
        self.load_journals(journals);
        Ok(())
    }

    /// Install journal options fetched elsewhere and become ready
    pub fn load_journals(&mut self, journals: Vec<Journal>) {
        self.journal_id = journals.first().map(|journal| journal.id);
        self.journals = journals;
        self.state = DialogState::Ready;
        debug!(
            invoice_id = %self.invoice.invoice_id,
            journals = self.journals.len(),
            "payment dialog ready"
        );
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn journal_id(&self) -> Option<JournalId> {
        self.journal_id
    }

    pub fn journals(&self) -> &[Journal] {
        &self.journals
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == DialogState::Ready
    }

    /// The currently selected journal, if any
    pub fn selected_journal(&self) -> Option<&Journal> {
        let id = self.journal_id?;
        self.journals.iter().find(|journal| journal.id == id)
    }

    /// Replace the amount to pay
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
    }

    /// Select a journal among the loaded options
    pub fn select_journal(&mut self, journal_id: JournalId) -> InvoicePayResult<()> {
        if !self.journals.iter().any(|journal| journal.id == journal_id) {
            return Err(InvoicePayError::Validation(format!(
                "Journal {} is not one of the available journals",
                journal_id
            )));
        }
        self.journal_id = Some(journal_id);
        Ok(())
    }

    /// Move the selection to the next journal, wrapping around
    pub fn select_next_journal(&mut self) {
        self.step_journal(1);
    }

    /// Move the selection to the previous journal, wrapping around
    pub fn select_previous_journal(&mut self) {
        self.step_journal(-1);
    }

    fn step_journal(&mut self, step: isize) {
        let count = self.journals.len();
        if count == 0 {
            return;
        }
        let current = self
            .journal_id
            .and_then(|id| self.journals.iter().position(|journal| journal.id == id));
        let next = match current {
            Some(index) => (index as isize + step).rem_euclid(count as isize) as usize,
            None => 0,
        };
        self.journal_id = Some(self.journals[next].id);
    }

    /// Resolve the dialog with the current amount and journal
    ///
    /// Only a ready dialog can be confirmed. Amount sign and journal presence
    /// are not checked here; the server decides whether the payment is valid.
    /// A dialog confirmed while still loading is consumed all the same and its
    /// handle resolves as cancelled.
    pub fn confirm(self) -> InvoicePayResult<DialogResult> {
        if self.state != DialogState::Ready {
            return Err(InvoicePayError::DialogState(
                "Cannot confirm a payment before the journals are loaded".into(),
            ));
        }

        let result = DialogResult::Confirmed {
            amount: self.amount,
            journal_id: self.journal_id,
        };
        info!(
            invoice_id = %self.invoice.invoice_id,
            amount = %self.amount,
            journal_id = ?self.journal_id.map(|id| id.get()),
            "payment dialog confirmed"
        );
        self.resolve(result);
        Ok(result)
    }

    /// Resolve the dialog as cancelled
    pub fn cancel(self) {
        info!(invoice_id = %self.invoice.invoice_id, "payment dialog cancelled");
        self.resolve(DialogResult::Cancelled);
    }

    fn resolve(self, result: DialogResult) {
        if self.resolver.send(result).is_err() {
            debug!("dialog resolved after its opener stopped waiting");
        }
    }
}
