//! Keybinding definitions
//!
//! The keys the handler reacts to, per context. The help dialog is built
//! from this table.

use crossterm::event::{KeyCode, KeyModifiers};

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub description: &'static str,
    pub context: KeyContext,
}

/// Context in which a keybinding is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Active everywhere outside dialogs
    Global,
    /// The home screen
    Home,
    /// The invoice list
    InvoiceList,
    /// The payment registration dialog
    PaymentDialog,
}

impl KeyContext {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Global => "Global Keys",
            Self::Home => "Home",
            Self::InvoiceList => "Invoice List",
            Self::PaymentDialog => "Register Payment",
        }
    }
}

const fn bind(key: KeyCode, description: &'static str, context: KeyContext) -> Keybinding {
    Keybinding {
        key,
        modifiers: KeyModifiers::NONE,
        description,
        context,
    }
}

/// All keybindings
pub static KEYBINDINGS: &[Keybinding] = &[
    // Global
    bind(KeyCode::Char('q'), "Quit", KeyContext::Global),
    bind(KeyCode::Char('?'), "Help", KeyContext::Global),
    bind(KeyCode::Char(':'), "Command palette", KeyContext::Global),
    // Home
    bind(KeyCode::Char('i'), "Open invoices", KeyContext::Home),
    bind(KeyCode::Enter, "Open invoices", KeyContext::Home),
    // Invoice list
    bind(KeyCode::Char('j'), "Move down", KeyContext::InvoiceList),
    bind(KeyCode::Char('k'), "Move up", KeyContext::InvoiceList),
    bind(KeyCode::Char('g'), "Go to top", KeyContext::InvoiceList),
    Keybinding {
        key: KeyCode::Char('G'),
        modifiers: KeyModifiers::SHIFT,
        description: "Go to bottom",
        context: KeyContext::InvoiceList,
    },
    bind(KeyCode::Char('p'), "Post draft invoice", KeyContext::InvoiceList),
    bind(KeyCode::Enter, "Register payment", KeyContext::InvoiceList),
    bind(KeyCode::Char('r'), "Register payment", KeyContext::InvoiceList),
    Keybinding {
        key: KeyCode::Char('R'),
        modifiers: KeyModifiers::SHIFT,
        description: "Reload invoices",
        context: KeyContext::InvoiceList,
    },
    bind(KeyCode::Esc, "Back to home", KeyContext::InvoiceList),
    bind(KeyCode::Char('b'), "Back to home", KeyContext::InvoiceList),
    // Payment dialog
    bind(KeyCode::Tab, "Next journal", KeyContext::PaymentDialog),
    Keybinding {
        key: KeyCode::BackTab,
        modifiers: KeyModifiers::SHIFT,
        description: "Previous journal",
        context: KeyContext::PaymentDialog,
    },
    bind(KeyCode::Enter, "Confirm payment", KeyContext::PaymentDialog),
    bind(KeyCode::Esc, "Cancel payment", KeyContext::PaymentDialog),
];

/// Get the keybindings of one context
pub fn get_keybindings(context: KeyContext) -> Vec<&'static Keybinding> {
    KEYBINDINGS
        .iter()
        .filter(|kb| kb.context == context)
        .collect()
}

/// Format a keybinding for display
pub fn format_keybinding(kb: &Keybinding) -> String {
    let mut parts = Vec::new();

    if kb.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    // Shift is implied by upper-case characters
    if kb.modifiers.contains(KeyModifiers::SHIFT)
        && !matches!(kb.key, KeyCode::Char(_) | KeyCode::BackTab)
    {
        parts.push("Shift".to_string());
    }

    parts.push(match kb.key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        other => format!("{:?}", other),
    });
    parts.join("+")
}
