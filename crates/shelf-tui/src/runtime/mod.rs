//! Runtime: owns the terminal and executes effects.
//!
//! The loop draws when state changed, polls the terminal, feeds each event
//! through the reducer, and executes the returned effects against the
//! collaborators. Effect results go into a FIFO inbox that is drained
//! before the next terminal poll, so events are handled strictly in the
//! order they were produced.
//!
//! ## Module Structure
//!
//! - `handlers.rs`: one function per collaborator call

pub mod handlers;

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
pub use handlers::Services;
use tracing::debug;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::LandingTerminal;
use crate::{render, terminal, update};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// The reducer, the collaborators and the inbox, without a terminal.
pub struct Dispatcher {
    pub state: AppState,
    services: Services,
    inbox: VecDeque<UiEvent>,
}

impl Dispatcher {
    pub fn new(state: AppState, services: Services) -> Self {
        Self {
            state,
            services,
            inbox: VecDeque::new(),
        }
    }

    /// Runs one event through the reducer, executes its effects, and drains
    /// the inbox (including results of effects those results produce).
    pub fn dispatch(&mut self, event: UiEvent) {
        self.inbox.push_back(event);
        while let Some(event) = self.inbox.pop_front() {
            let effects = update::update(&mut self.state, event);
            for effect in effects {
                self.execute_effect(effect);
            }
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        if effect == UiEffect::Quit {
            debug!("quit requested");
            self.state.should_quit = true;
            return;
        }
        if let Some(event) = self.services.execute(effect) {
            self.inbox.push_back(event);
        }
    }
}

/// Terminal front end for the landing page.
pub struct TuiRuntime {
    terminal: LandingTerminal,
    dispatcher: Dispatcher,
}

impl TuiRuntime {
    /// Installs the panic hook and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be put into raw mode on the
    /// alternate screen.
    pub fn new(state: AppState, services: Services) -> Result<Self> {
        // Before entering the alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        Ok(Self {
            terminal,
            dispatcher: Dispatcher::new(state, services),
        })
    }

    /// Runs the event loop until the visitor quits.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal input fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let result = self.event_loop();

        let _ = terminal::disable_input_features();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.dispatcher.state.should_quit {
            if dirty {
                let state = &self.dispatcher.state;
                self.terminal.draw(|frame| render::render(state, frame))?;
                dirty = false;
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            // Drain everything already queued so a paste burst renders once.
            loop {
                let term_event = event::read()?;
                self.dispatcher.dispatch(UiEvent::Terminal(term_event));
                if self.dispatcher.state.should_quit || !event::poll(Duration::ZERO)? {
                    break;
                }
            }
            dirty = true;
        }

        Ok(())
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
