//! Screen navigation
//!
//! Hosts own the actual screens; the workflow only asks for transitions
//! through the [`Navigator`] trait.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

/// Screens the workflow can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// The host's main screen, where the Invoices button lives
    #[default]
    Home,
    /// The invoice list
    Invoicing,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::Invoicing => write!(f, "Invoices"),
        }
    }
}

/// Navigation context the workflow drives
pub trait Navigator {
    /// Show a screen on top of the current one
    fn show_screen(&mut self, screen: Screen);

    /// Return to the previous screen
    fn close_screen(&mut self);
}

/// A stack of screens with `Home` always at the bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    screens: Vec<Screen>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self {
            screens: vec![Screen::Home],
        }
    }
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// The screen currently shown
    pub fn current(&self) -> Screen {
        self.screens.last().copied().unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.screens.len()
    }
}

impl Navigator for NavigationStack {
    fn show_screen(&mut self, screen: Screen) {
        // Showing the screen already on top is a no-op
        if self.current() != screen {
            self.screens.push(screen);
        }
        debug!(%screen, depth = self.screens.len(), "show screen");
    }

    fn close_screen(&mut self) {
        if self.screens.len() > 1 {
            self.screens.pop();
        }
        debug!(screen = %self.current(), depth = self.screens.len(), "close screen");
    }
}

/// A navigation stack shared between the workflow task and its observers
#[derive(Debug, Clone, Default)]
pub struct SharedNavigation(Arc<Mutex<NavigationStack>>);

impl SharedNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        self.lock().current()
    }

    /// Lock the stack, taking it back from a holder that panicked
    ///
    /// Every stack operation leaves the stack valid, so a poisoned lock still
    /// guards a usable value.
    fn lock(&self) -> MutexGuard<'_, NavigationStack> {
        self.0.lock().unwrap_or_else(|poisoned| {
            warn!("navigation lock was poisoned; recovering the screen stack");
            poisoned.into_inner()
        })
    }
}

impl Navigator for SharedNavigation {
    fn show_screen(&mut self, screen: Screen) {
        self.lock().show_screen(screen);
    }

    fn close_screen(&mut self) {
        self.lock().close_screen();
    }
}
