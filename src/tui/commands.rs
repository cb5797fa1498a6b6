//! Command definitions for the command palette

/// A command that can be executed from the palette
#[derive(Debug, Clone)]
pub struct Command {
    /// Command name (what user types)
    pub name: &'static str,
    pub description: &'static str,
    /// Equivalent key, if any
    pub shortcut: Option<&'static str>,
    pub action: CommandAction,
}

/// Actions that commands can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    OpenInvoices,
    Reload,
    PostInvoice,
    PayInvoice,
    Back,
    Help,
    Quit,
}

/// All available commands
pub static COMMANDS: &[Command] = &[
    Command {
        name: "invoices",
        description: "Open the invoice list",
        shortcut: Some("i"),
        action: CommandAction::OpenInvoices,
    },
    Command {
        name: "reload",
        description: "Fetch the invoice list again",
        shortcut: Some("R"),
        action: CommandAction::Reload,
    },
    Command {
        name: "post",
        description: "Post the selected draft invoice",
        shortcut: Some("p"),
        action: CommandAction::PostInvoice,
    },
    Command {
        name: "pay",
        description: "Register a payment for the selected invoice",
        shortcut: Some("Enter"),
        action: CommandAction::PayInvoice,
    },
    Command {
        name: "back",
        description: "Leave the invoice list",
        shortcut: Some("Esc"),
        action: CommandAction::Back,
    },
    Command {
        name: "help",
        description: "Show keyboard shortcuts",
        shortcut: Some("?"),
        action: CommandAction::Help,
    },
    Command {
        name: "quit",
        description: "Leave the terminal UI",
        shortcut: Some("q"),
        action: CommandAction::Quit,
    },
];

/// Commands whose name or description contains the query, in palette order
pub fn filter_commands(query: &str) -> Vec<&'static Command> {
    let query = query.trim().to_lowercase();
    COMMANDS
        .iter()
        .filter(|cmd| {
            query.is_empty()
                || cmd.name.contains(&query)
                || cmd.description.to_lowercase().contains(&query)
        })
        .collect()
}
