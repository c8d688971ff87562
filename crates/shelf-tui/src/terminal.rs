//! Taking over and handing back the visitor's terminal.
//!
//! The landing page runs in raw mode on the alternate screen with bracketed
//! paste on. Everything switched on here is switched off again on normal
//! exit (the runtime's Drop), on panic (the hook below), and when setup
//! itself fails halfway.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::warn;

pub type LandingTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Switches to raw mode and the alternate screen and wraps stdout.
///
/// If anything after raw mode fails, raw mode and the alternate screen are
/// undone before the error is returned. Call `install_panic_hook()` first.
///
/// # Errors
/// Returns an error if raw mode, the alternate screen or the ratatui
/// terminal cannot be set up.
pub fn setup_terminal() -> Result<LandingTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    undo_on_error(open_landing_screen, || {
        if let Err(err) = restore_terminal() {
            warn!(%err, "terminal left partly set up");
        }
    })
}

fn open_landing_screen() -> Result<LandingTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Runs `step`; when it fails, runs `undo` before passing the error on.
fn undo_on_error<T>(step: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    let result = step();
    if result.is_err() {
        undo();
    }
    result
}

/// Bracketed paste, so a pasted password arrives as one event instead of
/// a burst of key presses.
///
/// # Errors
/// Returns an error if the escape sequence cannot be written to stdout.
pub fn enable_input_features() -> Result<()> {
    execute!(io::stdout(), EnableBracketedPaste).context("Failed to enable bracketed paste")
}

/// # Errors
/// Returns an error if the escape sequence cannot be written to stdout.
pub fn disable_input_features() -> Result<()> {
    execute!(io::stdout(), DisableBracketedPaste).context("Failed to disable bracketed paste")
}

/// Hands the terminal back: paste off, main screen, cooked mode. Safe to
/// call more than once.
///
/// # Errors
/// Returns an error if the main screen cannot be restored or raw mode
/// cannot be switched off.
pub fn restore_terminal() -> Result<()> {
    // Paste mode is written while still raw.
    let _ = execute!(io::stdout(), DisableBracketedPaste);

    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")
}

/// Restores the terminal before the default hook prints the panic, so the
/// message is readable.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}
