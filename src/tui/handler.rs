//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! screen and dialog.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, App};
use super::commands::{filter_commands, CommandAction};
use super::event::Event;
use crate::workflow::{Screen, WorkflowCommand};

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize => Ok(()),
        Event::Tick => {
            app.sync();
            Ok(())
        }
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    // The error dialog sits above everything
    if app.error.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            app.dismiss_error();
        }
        return Ok(());
    }

    match app.active_dialog {
        ActiveDialog::Help => {
            app.close_dialog();
            Ok(())
        }
        ActiveDialog::CommandPalette => handle_command_palette_key(app, key),
        ActiveDialog::RegisterPayment => handle_payment_key(app, key),
        ActiveDialog::None => handle_normal_key(app, key),
    }
}

/// Handle keys outside dialogs
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return Ok(());
        }
        KeyCode::Char(':') | KeyCode::Char('/') => {
            app.open_dialog(ActiveDialog::CommandPalette);
            return Ok(());
        }
        _ => {}
    }

    match app.screen() {
        Screen::Home => handle_home_key(app, key),
        Screen::Invoicing => handle_invoice_list_key(app, key),
    }
    Ok(())
}

fn handle_home_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Char('i') | KeyCode::Enter) {
        app.send(WorkflowCommand::OpenInvoices);
    }
}

fn handle_invoice_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Char('p') => app.post_selected(),
        KeyCode::Enter | KeyCode::Char('r') => app.pay_selected(),
        KeyCode::Char('R') => app.send(WorkflowCommand::Reload),
        KeyCode::Esc | KeyCode::Char('b') => app.send(WorkflowCommand::Close),
        _ => {}
    }
}

/// Handle keys in the payment dialog
fn handle_payment_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.cancel_payment(),
        KeyCode::Enter => app.confirm_payment(),
        _ => {
            let Some(form) = app.payment.as_mut() else {
                app.close_dialog();
                return Ok(());
            };
            match key.code {
                KeyCode::Tab | KeyCode::Down => form.next_journal(),
                KeyCode::BackTab | KeyCode::Up => form.previous_journal(),
                KeyCode::Char(c) => form.insert(c),
                KeyCode::Backspace => form.amount_input.backspace(),
                KeyCode::Delete => form.amount_input.delete(),
                KeyCode::Left => form.amount_input.move_left(),
                KeyCode::Right => form.amount_input.move_right(),
                KeyCode::Home => form.amount_input.move_start(),
                KeyCode::End => form.amount_input.move_end(),
                _ => {}
            }
        }
    }
    Ok(())
}

/// Handle keys in the command palette
fn handle_command_palette_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => {
            let matches = filter_commands(app.command_input.value());
            let action = matches
                .get(app.selected_command_index.min(matches.len().saturating_sub(1)))
                .map(|cmd| cmd.action);
            app.close_dialog();
            if let Some(action) = action {
                execute_command(app, action);
            }
        }
        KeyCode::Up => {
            app.selected_command_index = app.selected_command_index.saturating_sub(1);
        }
        KeyCode::Down => {
            let count = filter_commands(app.command_input.value()).len();
            if app.selected_command_index + 1 < count {
                app.selected_command_index += 1;
            }
        }
        KeyCode::Backspace => {
            app.command_input.backspace();
            app.selected_command_index = 0;
        }
        KeyCode::Char(c) => {
            app.command_input.insert(c);
            app.selected_command_index = 0;
        }
        _ => {}
    }
    Ok(())
}

/// Execute a palette command
fn execute_command(app: &mut App, action: CommandAction) {
    match action {
        CommandAction::OpenInvoices => app.send(WorkflowCommand::OpenInvoices),
        CommandAction::Reload => app.send(WorkflowCommand::Reload),
        CommandAction::PostInvoice => app.post_selected(),
        CommandAction::PayInvoice => app.pay_selected(),
        CommandAction::Back => app.send(WorkflowCommand::Close),
        CommandAction::Help => app.open_dialog(ActiveDialog::Help),
        CommandAction::Quit => app.quit(),
    }
}
