//! Application state for the TUI
//!
//! The App struct mirrors the latest workflow snapshot and holds everything
//! that only exists on screen: the selection, open dialogs and
//! toasts.

use std::time::Instant;

use crate::config::Settings;
use crate::error::InvoicePayError;
use crate::models::Invoice;
use crate::workflow::{
    PaymentRegistrationDialog, Screen, WorkflowCommand, WorkflowHandle, WorkflowSnapshot,
};

use super::dialogs::payment::PaymentForm;
use super::widgets::{ErrorInfo, TextInput, Toast, ToastQueue};

/// Which dialog is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    CommandPalette,
    /// The payment form in [`App::payment`]
    RegisterPayment,
}

/// Main application state
pub struct App {
    /// Whether the app should quit
    pub should_quit: bool,

    pub settings: Settings,

    workflow: WorkflowHandle,

    /// Latest state reported by the workflow
    pub snapshot: WorkflowSnapshot,

    /// Completed command count already reported to the user
    reported: u64,

    /// Selected row in the invoice list
    pub selected_index: usize,

    pub active_dialog: ActiveDialog,

    /// Payment being edited, while the workflow waits for it
    pub payment: Option<PaymentForm>,

    pub command_input: TextInput,
    pub selected_command_index: usize,

    /// Error shown above everything else until dismissed
    pub error: Option<ErrorInfo>,

    pub toasts: ToastQueue,
}

impl App {
    pub fn new(workflow: WorkflowHandle, settings: Settings) -> Self {
        let snapshot = workflow.snapshot();
        Self {
            should_quit: false,
            settings,
            reported: snapshot.completed,
            snapshot,
            workflow,
            selected_index: 0,
            active_dialog: ActiveDialog::None,
            payment: None,
            command_input: TextInput::new().focused(true),
            selected_command_index: 0,
            error: None,
            toasts: ToastQueue::default(),
        }
    }

    /// Quit, cancelling any open payment and stopping the workflow
    pub fn quit(&mut self) {
        if let Some(form) = self.payment.take() {
            form.cancel();
        }
        self.workflow.shutdown();
        self.should_quit = true;
    }

    pub fn screen(&self) -> Screen {
        self.snapshot.screen
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.snapshot.invoices
    }

    pub fn selected_invoice(&self) -> Option<&Invoice> {
        self.snapshot.invoices.get(self.selected_index)
    }

    /// Send a command to the workflow, reporting a stopped workflow
    pub fn send(&mut self, command: WorkflowCommand) {
        if let Err(err) = self.workflow.send(command) {
            self.show_error(&err);
        }
    }

    /// Pick up workflow updates; called before every frame
    pub fn sync(&mut self) {
        while let Some(snapshot) = self.workflow.changed_snapshot() {
            self.apply_snapshot(snapshot);
        }
        if self.payment.is_none() {
            if let Some(dialog) = self.workflow.try_next_dialog() {
                self.open_payment(dialog);
            }
        }
        self.toasts.expire(Instant::now());
    }

    fn apply_snapshot(&mut self, snapshot: WorkflowSnapshot) {
        // Busy flips keep the previous outcome; report each command once
        if snapshot.completed > self.reported {
            self.reported = snapshot.completed;
            if let Some(err) = &snapshot.error {
                self.show_error(err);
            } else if let Some(status) = &snapshot.status {
                self.toasts.push(Toast::success(status.clone()));
            }
        }

        self.snapshot = snapshot;
        let count = self.snapshot.invoices.len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    fn open_payment(&mut self, dialog: PaymentRegistrationDialog) {
        self.payment = Some(PaymentForm::new(dialog));
        self.active_dialog = ActiveDialog::RegisterPayment;
    }

    /// Confirm the open payment with the typed amount
    ///
    /// An amount that does not parse keeps the form open with a message.
    pub fn confirm_payment(&mut self) {
        let Some(form) = self.payment.as_mut() else {
            return;
        };
        let amount = match form.parsed_amount() {
            Ok(amount) => amount,
            Err(err) => {
                form.error = Some(err.to_string());
                return;
            }
        };

        if let Some(form) = self.payment.take() {
            self.active_dialog = ActiveDialog::None;
            if let Err(err) = form.confirm(amount) {
                self.show_error(&err);
            }
        }
    }

    pub fn cancel_payment(&mut self) {
        if let Some(form) = self.payment.take() {
            form.cancel();
        }
        self.active_dialog = ActiveDialog::None;
    }

    pub fn post_selected(&mut self) {
        let Some(invoice) = self.selected_invoice() else {
            return;
        };
        if invoice.is_draft() {
            let command = WorkflowCommand::PostInvoice(invoice.invoice_id);
            self.send(command);
        } else {
            let message = format!("{} is already posted", invoice.display_name());
            self.toasts.push(Toast::info(message));
        }
    }

    pub fn pay_selected(&mut self) {
        if let Some(invoice) = self.selected_invoice() {
            let command = WorkflowCommand::Pay(invoice.invoice_id);
            self.send(command);
        }
    }

    pub fn show_error(&mut self, error: &InvoicePayError) {
        self.error = Some(ErrorInfo::from_error(error));
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Open a dialog; the payment form keeps priority while it is open
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        if self.payment.is_none() {
            self.active_dialog = dialog;
            self.command_input.clear();
            self.selected_command_index = 0;
        }
    }

    /// Close the current dialog, back to the payment form if one is open
    pub fn close_dialog(&mut self) {
        self.active_dialog = if self.payment.is_some() {
            ActiveDialog::RegisterPayment
        } else {
            ActiveDialog::None
        };
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.snapshot.invoices.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.snapshot.invoices.len().saturating_sub(1);
    }
}
