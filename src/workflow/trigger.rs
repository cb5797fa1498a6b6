//! Entry point into the invoice workflow

use tracing::info;

use super::navigation::{Navigator, Screen};

/// The "Invoices" button on the host's main screen
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoicesButton;

impl InvoicesButton {
    pub const LABEL: &'static str = "Invoices";

    /// Ask the navigation context to show the invoice list
    pub fn activate(&self, navigator: &mut impl Navigator) {
        info!("opening invoice list");
        navigator.show_screen(Screen::Invoicing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::navigation::NavigationStack;

    #[test]
    fn test_activate_shows_invoicing() {
        let mut stack = NavigationStack::new();
        InvoicesButton.activate(&mut stack);
        assert_eq!(stack.current(), Screen::Invoicing);
    }
}
