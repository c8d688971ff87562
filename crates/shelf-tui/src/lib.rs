//! Full-screen terminal front end for the Shelf landing page.

pub mod common;
pub mod effects;
pub mod events;
pub mod panels;
pub mod render;
pub mod render_utils;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
pub use runtime::{Dispatcher, Services, TuiRuntime};
use shelf_core::config::Config;
use tracing::info;

use crate::state::AppState;

/// Runs the interactive landing page until the visitor quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal, the configured catalog or
/// reviews cannot be loaded, or the terminal fails during the session.
pub fn run_landing_page(config: &Config) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The landing page requires a terminal.\n\
             Use `shelf search <QUERY>` for non-interactive catalog searches."
        );
    }

    let services = Services::from_config(config)?;
    let state = AppState::new(config.variant);
    info!(variant = %config.variant, "landing page starting");

    let mut runtime = TuiRuntime::new(state, services)?;
    runtime.run()
}
