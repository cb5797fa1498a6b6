//! The invoice payment workflow
//!
//! [`InvoicesButton`] opens the invoice list, [`InvoiceListCoordinator`]
//! owns the list and dispatches posting and payment, and
//! [`PaymentRegistrationDialog`] collects the payment details. Hosts plug in
//! through [`Navigator`] and [`ModalHost`]; [`spawn_workflow`] runs the whole
//! thing as a task for hosts that cannot await.

pub mod coordinator;
pub mod dialog;
pub mod driver;
pub mod navigation;
pub mod trigger;

pub use coordinator::InvoiceListCoordinator;
pub use dialog::{DialogHandle, DialogState, ModalHost, PaymentRegistrationDialog};
pub use driver::{spawn_workflow, ChannelModalHost, WorkflowCommand, WorkflowHandle, WorkflowSnapshot};
pub use navigation::{NavigationStack, Navigator, Screen, SharedNavigation};
pub use trigger::InvoicesButton;
