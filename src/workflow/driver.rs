//! Workflow driver
//!
//! Runs the invoice workflow as one tokio task so an interactive host can
//! drive it without awaiting anything itself. The host sends
//! [`WorkflowCommand`]s, watches [`WorkflowSnapshot`]s and receives payment
//! dialogs to show, one at a time. Commands are executed strictly in order.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::coordinator::InvoiceListCoordinator;
use super::dialog::{ModalHost, PaymentRegistrationDialog};
use super::navigation::{Navigator, Screen, SharedNavigation};
use super::trigger::InvoicesButton;
use crate::error::{InvoicePayError, InvoicePayResult};
use crate::models::{Invoice, InvoiceId, PaymentOutcome, PosContext};
use crate::services::InvoiceService;

/// Requests a host can make of the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowCommand {
    /// Press the Invoices button: show the list and load it
    OpenInvoices,
    /// Fetch the list again
    Reload,
    /// Post a draft invoice
    PostInvoice(InvoiceId),
    /// Ask for payment details and register a payment
    Pay(InvoiceId),
    /// Leave the invoice list
    Close,
    /// Stop the workflow task
    Shutdown,
}

/// What the host should currently display
#[derive(Debug, Clone, Default)]
pub struct WorkflowSnapshot {
    pub screen: Screen,
    pub invoices: Vec<Invoice>,
    /// A command is being executed
    pub busy: bool,
    /// Outcome of the last command, if it has something to report
    pub status: Option<String>,
    /// Error of the last command, if it failed
    pub error: Option<InvoicePayError>,
    /// Number of commands finished so far
    pub completed: u64,
}

/// Host side of a running workflow
#[derive(Debug)]
pub struct WorkflowHandle {
    commands: mpsc::UnboundedSender<WorkflowCommand>,
    snapshots: watch::Receiver<WorkflowSnapshot>,
    dialogs: mpsc::Receiver<PaymentRegistrationDialog>,
    cancel: CancellationToken,
}

impl WorkflowHandle {
    /// Queue a command
    pub fn send(&self, command: WorkflowCommand) -> InvoicePayResult<()> {
        self.commands
            .send(command)
            .map_err(|_| InvoicePayError::Tui("Workflow task has stopped".into()))
    }

    /// The latest snapshot
    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.snapshots.borrow().clone()
    }

    /// The latest snapshot, if it changed since the last call
    pub fn changed_snapshot(&mut self) -> Option<WorkflowSnapshot> {
        match self.snapshots.has_changed() {
            Ok(true) => Some(self.snapshots.borrow_and_update().clone()),
            _ => None,
        }
    }

    /// A receiver for awaiting snapshot changes
    pub fn snapshots(&self) -> watch::Receiver<WorkflowSnapshot> {
        self.snapshots.clone()
    }

    /// A dialog waiting to be shown, without blocking
    pub fn try_next_dialog(&mut self) -> Option<PaymentRegistrationDialog> {
        self.dialogs.try_recv().ok()
    }

    /// Wait for the next dialog to show
    pub async fn next_dialog(&mut self) -> Option<PaymentRegistrationDialog> {
        self.dialogs.recv().await
    }

    /// Stop the workflow, interrupting any pending remote call
    pub fn shutdown(&self) {
        self.cancel.cancel();
        let _ = self.commands.send(WorkflowCommand::Shutdown);
    }
}

/// Modal host that hands dialogs to the interactive host over a channel
pub struct ChannelModalHost {
    sender: mpsc::Sender<PaymentRegistrationDialog>,
}

impl ChannelModalHost {
    pub fn new(sender: mpsc::Sender<PaymentRegistrationDialog>) -> Self {
        Self { sender }
    }
}

#[async_trait::async_trait]
impl ModalHost for ChannelModalHost {
    async fn present(&mut self, dialog: PaymentRegistrationDialog) -> InvoicePayResult<()> {
        // A failed send drops the dialog, which resolves it as cancelled
        self.sender
            .send(dialog)
            .await
            .map_err(|_| InvoicePayError::DialogState("No host is listening for dialogs".into()))
    }
}

type Coordinator = InvoiceListCoordinator<SharedNavigation, ChannelModalHost>;

/// Start the workflow task
pub fn spawn_workflow(
    service: InvoiceService,
    context: PosContext,
) -> (WorkflowHandle, JoinHandle<()>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(WorkflowSnapshot::default());
    let (dialog_tx, dialog_rx) = mpsc::channel(1);
    let cancel = CancellationToken::new();

    let task = WorkflowTask {
        service,
        context,
        navigation: SharedNavigation::new(),
        coordinator: None,
        dialogs: dialog_tx,
        snapshots: snapshot_tx,
        completed: 0,
    };
    let join = tokio::spawn(task.run(command_rx, cancel.clone()));

    let handle = WorkflowHandle {
        commands: command_tx,
        snapshots: snapshot_rx,
        dialogs: dialog_rx,
        cancel,
    };
    (handle, join)
}

struct WorkflowTask {
    service: InvoiceService,
    context: PosContext,
    navigation: SharedNavigation,
    coordinator: Option<Coordinator>,
    dialogs: mpsc::Sender<PaymentRegistrationDialog>,
    snapshots: watch::Sender<WorkflowSnapshot>,
    completed: u64,
}

impl WorkflowTask {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<WorkflowCommand>,
        cancel: CancellationToken,
    ) {
        info!("workflow started");
        loop {
            let command = tokio::select! {
                _ = cancel.cancelled() => break,
                command = commands.recv() => match command {
                    Some(WorkflowCommand::Shutdown) | None => break,
                    Some(command) => command,
                },
            };

            debug!(?command, "executing workflow command");
            self.snapshots.send_modify(|snapshot| snapshot.busy = true);

            let outcome = tokio::select! {
                _ = cancel.cancelled() => break,
                outcome = self.execute(command) => outcome,
            };

            self.completed += 1;
            match outcome {
                Ok(status) => self.publish(status, None),
                Err(err) => {
                    warn!(?command, error = %err, "workflow command failed");
                    self.publish(None, Some(err));
                }
            }
        }
        info!("workflow stopped");
    }

    async fn execute(&mut self, command: WorkflowCommand) -> InvoicePayResult<Option<String>> {
        match command {
            WorkflowCommand::OpenInvoices => {
                InvoicesButton.activate(&mut self.navigation);
                self.open_coordinator().await?;
                Ok(None)
            }
            WorkflowCommand::Reload => {
                if let Some(coordinator) = self.coordinator.as_mut() {
                    coordinator.load_invoices().await?;
                } else if self.navigation.current() == Screen::Invoicing {
                    // A failed first load left no coordinator behind
                    self.open_coordinator().await?;
                } else {
                    return Err(invoices_not_open());
                }
                Ok(Some("Invoices reloaded".into()))
            }
            WorkflowCommand::PostInvoice(invoice_id) => {
                let coordinator = self.coordinator.as_mut().ok_or_else(invoices_not_open)?;
                coordinator.confirm_invoice(invoice_id).await?;
                Ok(Some(format!("Invoice {} posted", invoice_id.get())))
            }
            WorkflowCommand::Pay(invoice_id) => {
                let coordinator = self.coordinator.as_mut().ok_or_else(invoices_not_open)?;
                let outcome = coordinator.pay_invoice(invoice_id).await?;
                Ok(Some(match outcome {
                    PaymentOutcome::Registered(request) => format!(
                        "Payment of {} registered for invoice {}",
                        request.amount,
                        request.invoice_id.get()
                    ),
                    PaymentOutcome::Cancelled => "Payment cancelled".into(),
                }))
            }
            WorkflowCommand::Close => {
                match self.coordinator.take() {
                    Some(mut coordinator) => coordinator.close(),
                    None => self.navigation.close_screen(),
                }
                Ok(None)
            }
            WorkflowCommand::Shutdown => Ok(None),
        }
    }

    async fn open_coordinator(&mut self) -> InvoicePayResult<()> {
        let coordinator = InvoiceListCoordinator::initialize(
            self.service.clone(),
            self.navigation.clone(),
            ChannelModalHost::new(self.dialogs.clone()),
            self.context,
        )
        .await?;
        self.coordinator = Some(coordinator);
        Ok(())
    }

    fn publish(&self, status: Option<String>, error: Option<InvoicePayError>) {
        let snapshot = WorkflowSnapshot {
            screen: self.navigation.current(),
            invoices: self
                .coordinator
                .as_ref()
                .map(|coordinator| coordinator.invoices().to_vec())
                .unwrap_or_default(),
            busy: false,
            status,
            error,
            completed: self.completed,
        };
        self.snapshots.send_replace(snapshot);
    }
}

fn invoices_not_open() -> InvoicePayError {
    InvoicePayError::Validation("The invoice list is not open".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteFailure;
    use crate::models::{DialogResult, JournalId};
    use crate::rpc::scripted::ScriptedRemote;
    use serde_json::json;
    use std::sync::Arc;

    fn remote() -> Arc<ScriptedRemote> {
        Arc::new(
            ScriptedRemote::new()
                .reply(
                    "get_invoices",
                    json!([{"invoice_id": 1, "name": "INV/1", "amount_total": 50, "amount_residual": 50, "state": "posted"}]),
                )
                .reply("get_journal", json!([{"id": 9, "name": "Cash"}])),
        )
    }

    async fn wait_for_completed(handle: &WorkflowHandle, count: u64) -> WorkflowSnapshot {
        let mut snapshots = handle.snapshots();
        let snapshot = snapshots
            .wait_for(|snapshot| snapshot.completed >= count)
            .await
            .unwrap()
            .clone();
        snapshot
    }

    #[tokio::test]
    async fn test_open_invoices_shows_list() {
        let remote = remote();
        let (handle, _join) = spawn_workflow(InvoiceService::new(remote.clone()), PosContext::default());

        handle.send(WorkflowCommand::OpenInvoices).unwrap();
        let snapshot = wait_for_completed(&handle, 1).await;

        assert_eq!(snapshot.screen, Screen::Invoicing);
        assert_eq!(snapshot.invoices.len(), 1);
        assert!(!snapshot.busy);
        assert!(snapshot.error.is_none());
        assert_eq!(remote.count("get_invoices"), 1);
    }

    #[tokio::test]
    async fn test_pay_hands_dialog_to_host() {
        let remote = remote();
        let (mut handle, _join) = spawn_workflow(InvoiceService::new(remote.clone()), PosContext::default());

        handle.send(WorkflowCommand::OpenInvoices).unwrap();
        handle.send(WorkflowCommand::Pay(InvoiceId::new(1))).unwrap();

        let dialog = handle.next_dialog().await.unwrap();
        assert_eq!(dialog.journal_id(), Some(JournalId::new(9)));
        assert!(dialog.confirm().unwrap().is_confirmed());

        let snapshot = wait_for_completed(&handle, 2).await;
        assert_eq!(
            snapshot.status.as_deref(),
            Some("Payment of $50.00 registered for invoice 1")
        );
        assert_eq!(remote.count("pos_register_payment"), 1);
        assert_eq!(remote.count("get_invoices"), 2);
    }

    #[tokio::test]
    async fn test_dropped_dialog_cancels_payment() {
        let remote = remote();
        let (mut handle, _join) = spawn_workflow(InvoiceService::new(remote.clone()), PosContext::default());

        handle.send(WorkflowCommand::OpenInvoices).unwrap();
        handle.send(WorkflowCommand::Pay(InvoiceId::new(1))).unwrap();
        drop(handle.next_dialog().await);

        let snapshot = wait_for_completed(&handle, 2).await;
        assert_eq!(snapshot.status.as_deref(), Some("Payment cancelled"));
        assert_eq!(remote.count("pos_register_payment"), 0);
    }

    #[tokio::test]
    async fn test_failed_open_reports_error_and_reload_recovers() {
        let remote = Arc::new(ScriptedRemote::new().fail("get_invoices", RemoteFailure::Http(503)));
        let (handle, _join) = spawn_workflow(InvoiceService::new(remote.clone()), PosContext::default());

        handle.send(WorkflowCommand::OpenInvoices).unwrap();
        let snapshot = wait_for_completed(&handle, 1).await;
        assert_eq!(snapshot.screen, Screen::Invoicing);
        assert!(snapshot.invoices.is_empty());
        assert_eq!(snapshot.error.unwrap().procedure(), Some("get_invoices"));

        remote.push("get_invoices", Ok(json!([])));
        handle.send(WorkflowCommand::Reload).unwrap();
        let snapshot = wait_for_completed(&handle, 2).await;
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.status.as_deref(), Some("Invoices reloaded"));
    }

    #[tokio::test]
    async fn test_post_requires_open_list() {
        let remote = remote();
        let (handle, _join) = spawn_workflow(InvoiceService::new(remote.clone()), PosContext::default());

        handle.send(WorkflowCommand::PostInvoice(InvoiceId::new(1))).unwrap();
        let snapshot = wait_for_completed(&handle, 1).await;

        assert!(snapshot.error.unwrap().is_validation());
        assert_eq!(remote.count("post_invoice"), 0);
    }

    #[tokio::test]
    async fn test_close_returns_home() {
        let remote = remote();
        let (handle, _join) = spawn_workflow(InvoiceService::new(remote.clone()), PosContext::default());

        handle.send(WorkflowCommand::OpenInvoices).unwrap();
        handle.send(WorkflowCommand::Close).unwrap();
        let snapshot = wait_for_completed(&handle, 2).await;

        assert_eq!(snapshot.screen, Screen::Home);
        assert!(snapshot.invoices.is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_stops_task_while_dialog_pending() {
        let remote = remote();
        let (mut handle, join) = spawn_workflow(InvoiceService::new(remote.clone()), PosContext::default());

        handle.send(WorkflowCommand::OpenInvoices).unwrap();
        handle.send(WorkflowCommand::Pay(InvoiceId::new(1))).unwrap();
        let dialog = handle.next_dialog().await.unwrap();

        handle.shutdown();
        join.await.unwrap();

        // The opener is gone; resolving the dialog afterwards is harmless
        assert_eq!(
            dialog.confirm().unwrap(),
            DialogResult::Confirmed {
                amount: crate::models::Money::from_cents(5000),
                journal_id: Some(JournalId::new(9)),
            }
        );
        assert_eq!(remote.count("pos_register_payment"), 0);
    }
}
