//! Interactive landing page (the default command).

use anyhow::Result;
use shelf_core::config::Config;

pub fn run(config: &Config) -> Result<()> {
    shelf_tui::run_landing_page(config)
}
