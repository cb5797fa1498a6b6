//! Terminal ownership and the UI loop

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use crate::config::Settings;
use crate::workflow::WorkflowHandle;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;
use super::views;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Raw mode and the alternate screen, for as long as this value lives
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = leave_terminal() {
            warn!(error = %err, "failed to restore the terminal");
        }
        let _ = self.terminal.show_cursor();
    }
}

fn leave_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

/// A panic message printed inside the alternate screen is lost
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = leave_terminal();
            previous(panic_info);
        }));
    });
}

/// Run the TUI on top of a running workflow
///
/// Blocks until the user quits; the workflow is shut down on the way out.
/// Must be called off the async runtime's worker threads.
pub fn run_tui(workflow: WorkflowHandle, settings: Settings) -> Result<()> {
    let mut app = App::new(workflow, settings);

    let result = TerminalSession::enter()
        .context("failed to set up the terminal")
        .and_then(|mut session| {
            info!("terminal UI started");
            ui_loop(&mut session.terminal, &mut app)
        });

    if !app.should_quit {
        app.quit();
    }
    info!("terminal UI stopped");
    result
}

fn ui_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let events = EventHandler::new(TICK_RATE).context("failed to start terminal input")?;

    while !app.should_quit {
        app.sync();
        terminal.draw(|frame| views::render(frame, app))?;
        let event = events.next().context("terminal input stopped")?;
        handle_event(app, event)?;
    }
    Ok(())
}
