//! Invoice list coordinator
//!
//! Owns the invoice list shown on the invoicing screen and dispatches the two
//! mutations available from it, posting a draft and registering a payment.
//! Every successful mutation is followed by exactly one reload, issued only
//! after the server acknowledged the mutation.

use tracing::{debug, info, instrument};

use super::dialog::{ModalHost, PaymentRegistrationDialog};
use super::navigation::Navigator;
use crate::error::{InvoicePayError, InvoicePayResult};
use crate::models::{Invoice, InvoiceId, PaymentOutcome, PaymentRequest, PosContext};
use crate::services::InvoiceService;

/// Coordinator for one open invoicing screen
pub struct InvoiceListCoordinator<N, M> {
    service: InvoiceService,
    navigator: N,
    modal: M,
    context: PosContext,
    invoices: Vec<Invoice>,
}

impl<N, M> InvoiceListCoordinator<N, M>
where
    N: Navigator + Send,
    M: ModalHost,
{
    /// Build a coordinator and wait for the first invoice fetch
    pub async fn initialize(
        service: InvoiceService,
        navigator: N,
        modal: M,
        context: PosContext,
    ) -> InvoicePayResult<Self> {
        let mut coordinator = Self {
            service,
            navigator,
            modal,
            context,
            invoices: Vec::new(),
        };
        coordinator.load_invoices().await?;
        Ok(coordinator)
    }

    /// The invoices from the most recent successful fetch
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Look up a listed invoice by id
    pub fn find_invoice(&self, invoice_id: InvoiceId) -> Option<&Invoice> {
        self.invoices
            .iter()
            .find(|invoice| invoice.invoice_id == invoice_id)
    }

    pub fn context(&self) -> PosContext {
        self.context
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn modal(&self) -> &M {
        &self.modal
    }

    /// Replace the list with a fresh fetch
    ///
    /// On failure the previous list stays as it was.
    pub async fn load_invoices(&mut self) -> InvoicePayResult<()> {
        let invoices = self.service.get_invoices().await?;
        debug!(count = invoices.len(), "invoice list replaced");
        self.invoices = invoices;
        Ok(())
    }

    /// Leave the invoicing screen
    pub fn close(&mut self) {
        self.navigator.close_screen();
    }

    /// Post a draft invoice, then reload
    #[instrument(skip(self))]
    pub async fn confirm_invoice(&mut self, invoice_id: InvoiceId) -> InvoicePayResult<()> {
        self.service.post_invoice(invoice_id).await?;
        self.load_invoices().await
    }

    /// Ask for payment details and register the payment if confirmed
    ///
    /// A confirmed dialog leads to exactly one payment call followed by one
    /// reload. A cancelled or dropped dialog leads to neither.
    #[instrument(skip_all, fields(invoice_id = %invoice.invoice_id))]
    pub async fn register_payment(&mut self, invoice: &Invoice) -> InvoicePayResult<PaymentOutcome> {
        let (mut dialog, handle) = PaymentRegistrationDialog::open(invoice.clone());
        dialog.initialize(&self.service).await?;
        self.modal.present(dialog).await?;

        let result = handle.result().await;
        let Some(request) = PaymentRequest::from_result(invoice.invoice_id, result, self.context) else {
            info!("payment not registered");
            return Ok(PaymentOutcome::Cancelled);
        };

        self.service.register_payment(&request).await?;
        self.load_invoices().await?;
        Ok(PaymentOutcome::Registered(request))
    }

    /// Register a payment for a listed invoice
    pub async fn pay_invoice(&mut self, invoice_id: InvoiceId) -> InvoicePayResult<PaymentOutcome> {
        let invoice = self
            .find_invoice(invoice_id)
            .cloned()
            .ok_or_else(|| InvoicePayError::invoice_not_found(invoice_id.to_string()))?;
        self.register_payment(&invoice).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteFailure;
    use crate::models::{ConfigId, JournalId, Money, SessionId};
    use crate::rpc::scripted::ScriptedRemote;
    use crate::workflow::navigation::{NavigationStack, Screen};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;

    /// What the test modal does with a presented dialog
    enum Reaction {
        Confirm,
        ConfirmWith(Money),
        Cancel,
        Drop,
    }

    struct TestModal {
        reaction: Reaction,
        presented: Vec<(InvoiceId, Money, Option<JournalId>)>,
    }

    impl TestModal {
        fn new(reaction: Reaction) -> Self {
            Self {
                reaction,
                presented: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl ModalHost for TestModal {
        async fn present(&mut self, mut dialog: PaymentRegistrationDialog) -> InvoicePayResult<()> {
            self.presented
                .push((dialog.invoice().invoice_id, dialog.amount(), dialog.journal_id()));
            match self.reaction {
                Reaction::Confirm => {
                    dialog.confirm()?;
                }
                Reaction::ConfirmWith(amount) => {
                    dialog.set_amount(amount);
                    dialog.confirm()?;
                }
                Reaction::Cancel => dialog.cancel(),
                Reaction::Drop => drop(dialog),
            }
            Ok(())
        }
    }

    fn invoice_rows(rows: &[(i64, f64)]) -> Value {
        Value::Array(
            rows.iter()
                .map(|(id, residual)| {
                    json!({
                        "invoice_id": id,
                        "name": format!("INV/{}", id),
                        "amount_total": residual,
                        "amount_residual": residual,
                        "state": "posted",
                        "payment_state": "not_paid"
                    })
                })
                .collect(),
        )
    }

    async fn coordinator(
        remote: &Arc<ScriptedRemote>,
        reaction: Reaction,
        context: PosContext,
    ) -> InvoiceListCoordinator<NavigationStack, TestModal> {
        let mut navigator = NavigationStack::new();
        navigator.show_screen(Screen::Invoicing);
        InvoiceListCoordinator::initialize(
            InvoiceService::new(remote.clone()),
            navigator,
            TestModal::new(reaction),
            context,
        )
        .await
        .unwrap()
    }

    fn methods(remote: &ScriptedRemote) -> Vec<&'static str> {
        remote.calls().iter().map(|call| call.procedure.method).collect()
    }

    #[tokio::test]
    async fn test_initialize_loads_invoices() {
        let remote = Arc::new(ScriptedRemote::new().reply("get_invoices", invoice_rows(&[(1, 50.0), (2, 10.0)])));
        let coordinator = coordinator(&remote, Reaction::Cancel, PosContext::default()).await;

        let ids: Vec<i64> = coordinator.invoices().iter().map(|i| i.invoice_id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(remote.count("get_invoices"), 1);
    }

    #[tokio::test]
    async fn test_initialize_failure_is_remote_call_failed() {
        let remote = Arc::new(ScriptedRemote::new().fail("get_invoices", RemoteFailure::Http(500)));
        let result = InvoiceListCoordinator::initialize(
            InvoiceService::new(remote.clone()),
            NavigationStack::new(),
            TestModal::new(Reaction::Cancel),
            PosContext::default(),
        )
        .await;

        let err = result.err().unwrap();
        assert_eq!(err.procedure(), Some("get_invoices"));
    }

    #[tokio::test]
    async fn test_load_invoices_keeps_last_successful_fetch() {
        let remote = Arc::new(ScriptedRemote::new().reply("get_invoices", invoice_rows(&[(1, 50.0)])));
        let mut coordinator = coordinator(&remote, Reaction::Cancel, PosContext::default()).await;

        remote.push("get_invoices", Ok(invoice_rows(&[(2, 10.0), (3, 7.5)])));
        coordinator.load_invoices().await.unwrap();
        let ids: Vec<i64> = coordinator.invoices().iter().map(|i| i.invoice_id.get()).collect();
        assert_eq!(ids, vec![2, 3]);

        // Server order is preserved as-is
        remote.push("get_invoices", Ok(invoice_rows(&[(3, 7.5), (2, 10.0)])));
        coordinator.load_invoices().await.unwrap();
        let ids: Vec<i64> = coordinator.invoices().iter().map(|i| i.invoice_id.get()).collect();
        assert_eq!(ids, vec![3, 2]);

        remote.push("get_invoices", Ok(json!([])));
        coordinator.load_invoices().await.unwrap();
        assert!(coordinator.invoices().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_leaves_list_untouched() {
        let remote = Arc::new(ScriptedRemote::new().reply("get_invoices", invoice_rows(&[(1, 50.0)])));
        let mut coordinator = coordinator(&remote, Reaction::Cancel, PosContext::default()).await;

        remote.push("get_invoices", Err(RemoteFailure::Transport("connection reset".into())));
        let err = coordinator.load_invoices().await.unwrap_err();

        assert!(err.is_remote());
        assert_eq!(coordinator.invoices().len(), 1);
        assert_eq!(coordinator.invoices()[0].invoice_id, InvoiceId::new(1));
    }

    #[tokio::test]
    async fn test_close_leaves_invoices_alone() {
        let remote = Arc::new(ScriptedRemote::new().reply("get_invoices", invoice_rows(&[(1, 50.0)])));
        let mut coordinator = coordinator(&remote, Reaction::Cancel, PosContext::default()).await;

        coordinator.close();
        assert_eq!(coordinator.navigator().current(), Screen::Home);
        assert_eq!(coordinator.invoices().len(), 1);
        assert_eq!(remote.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_confirm_invoice_reloads_once_after_post() {
        let remote = Arc::new(ScriptedRemote::new().reply("get_invoices", invoice_rows(&[(5, 20.0)])));
        let mut coordinator = coordinator(&remote, Reaction::Cancel, PosContext::default()).await;

        // The post's answer is irrelevant to the reload
        remote.push("post_invoice", Ok(Value::Null));
        coordinator.confirm_invoice(InvoiceId::new(5)).await.unwrap();

        assert_eq!(methods(&remote), vec!["get_invoices", "post_invoice", "get_invoices"]);
        assert_eq!(remote.calls_to("post_invoice")[0].args, vec![json!(5)]);
    }

    #[tokio::test]
    async fn test_failed_post_skips_reload() {
        let remote = Arc::new(ScriptedRemote::new().reply("get_invoices", invoice_rows(&[(5, 20.0)])));
        let mut coordinator = coordinator(&remote, Reaction::Cancel, PosContext::default()).await;

        remote.push(
            "post_invoice",
            Err(RemoteFailure::Server {
                name: "odoo.exceptions.UserError".into(),
                message: "Invoice not found.".into(),
            }),
        );
        let err = coordinator.confirm_invoice(InvoiceId::new(5)).await.unwrap_err();

        assert_eq!(err.procedure(), Some("post_invoice"));
        assert_eq!(remote.count("get_invoices"), 1);
    }

    #[tokio::test]
    async fn test_confirmed_payment_registers_and_reloads() {
        let remote = Arc::new(
            ScriptedRemote::new()
                .reply("get_invoices", invoice_rows(&[(1, 50.0)]))
                .reply("get_journal", json!([{"id": 9, "name": "Cash"}])),
        );
        let context = PosContext::new(Some(SessionId::new(4)), Some(ConfigId::new(2)));
        let mut coordinator = coordinator(&remote, Reaction::Confirm, context).await;

        let invoice = coordinator.invoices()[0].clone();
        let outcome = coordinator.register_payment(&invoice).await.unwrap();

        let request = match outcome {
            PaymentOutcome::Registered(request) => request,
            PaymentOutcome::Cancelled => panic!("payment was cancelled"),
        };
        assert_eq!(request.amount, Money::from_cents(5000));
        assert_eq!(request.journal_id, Some(JournalId::new(9)));

        assert_eq!(
            coordinator.modal().presented,
            vec![(InvoiceId::new(1), Money::from_cents(5000), Some(JournalId::new(9)))]
        );
        assert_eq!(
            methods(&remote),
            vec!["get_invoices", "get_journal", "pos_register_payment", "get_invoices"]
        );

        let payment = &remote.calls_to("pos_register_payment")[0];
        assert_eq!(payment.args, vec![json!(1), json!(9), json!(50.0), json!(4), json!(2)]);
        assert_eq!(payment.context.get("from_pos"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn test_edited_amount_is_sent() {
        let remote = Arc::new(
            ScriptedRemote::new()
                .reply("get_invoices", invoice_rows(&[(1, 125.5)]))
                .reply("get_journal", json!([{"id": 3, "name": "Cash"}, {"id": 7, "name": "Bank"}])),
        );
        let mut coordinator = coordinator(
            &remote,
            Reaction::ConfirmWith(Money::from_cents(2000)),
            PosContext::default(),
        )
        .await;

        assert!(coordinator.modal().presented.is_empty());
        coordinator.pay_invoice(InvoiceId::new(1)).await.unwrap();

        assert_eq!(coordinator.modal().presented[0].1, Money::from_cents(12550));
        assert_eq!(
            remote.calls_to("pos_register_payment")[0].args,
            vec![json!(1), json!(3), json!(20.0), json!(null), json!(null)]
        );
    }

    #[tokio::test]
    async fn test_full_payment_of_three_decimal_residual() {
        let remote = Arc::new(
            ScriptedRemote::new()
                .reply("get_invoices", invoice_rows(&[(1, 12.345)]))
                .reply("get_journal", json!([{"id": 9, "name": "Cash"}])),
        );
        let mut coordinator = coordinator(&remote, Reaction::Confirm, PosContext::default()).await;

        coordinator.pay_invoice(InvoiceId::new(1)).await.unwrap();

        assert_eq!(
            remote.calls_to("pos_register_payment")[0].args,
            vec![json!(1), json!(9), json!(12.345), json!(null), json!(null)]
        );
    }

    #[tokio::test]
    async fn test_cancelled_payment_makes_no_calls() {
        let remote = Arc::new(
            ScriptedRemote::new()
                .reply("get_invoices", invoice_rows(&[(1, 50.0)]))
                .reply("get_journal", json!([{"id": 9, "name": "Cash"}])),
        );
        let mut coordinator = coordinator(&remote, Reaction::Cancel, PosContext::default()).await;

        let invoice = coordinator.invoices()[0].clone();
        let outcome = coordinator.register_payment(&invoice).await.unwrap();

        assert_eq!(outcome, PaymentOutcome::Cancelled);
        assert_eq!(remote.count("pos_register_payment"), 0);
        assert_eq!(remote.count("get_invoices"), 1);
    }

    #[tokio::test]
    async fn test_dropped_dialog_counts_as_cancel() {
        let remote = Arc::new(
            ScriptedRemote::new()
                .reply("get_invoices", invoice_rows(&[(1, 50.0)]))
                .reply("get_journal", json!([])),
        );
        let mut coordinator = coordinator(&remote, Reaction::Drop, PosContext::default()).await;

        let outcome = coordinator.pay_invoice(InvoiceId::new(1)).await.unwrap();

        assert_eq!(outcome, PaymentOutcome::Cancelled);
        assert_eq!(remote.count("pos_register_payment"), 0);
        assert_eq!(remote.count("get_invoices"), 1);
    }

    #[tokio::test]
    async fn test_failed_payment_skips_reload() {
        let remote = Arc::new(
            ScriptedRemote::new()
                .reply("get_invoices", invoice_rows(&[(1, 50.0)]))
                .reply("get_journal", json!([{"id": 9, "name": "Cash"}]))
                .fail("pos_register_payment", RemoteFailure::Timeout(std::time::Duration::from_secs(30))),
        );
        let mut coordinator = coordinator(&remote, Reaction::Confirm, PosContext::default()).await;

        let err = coordinator.pay_invoice(InvoiceId::new(1)).await.unwrap_err();

        assert_eq!(err.procedure(), Some("pos_register_payment"));
        assert_eq!(remote.count("pos_register_payment"), 1);
        assert_eq!(remote.count("get_invoices"), 1);
    }

    #[tokio::test]
    async fn test_pay_unknown_invoice_is_not_found() {
        let remote = Arc::new(ScriptedRemote::new().reply("get_invoices", invoice_rows(&[(1, 50.0)])));
        let mut coordinator = coordinator(&remote, Reaction::Confirm, PosContext::default()).await;

        let err = coordinator.pay_invoice(InvoiceId::new(42)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(remote.count("get_journal"), 0);
    }
}
