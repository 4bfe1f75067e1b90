//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the patron repository.

pub mod import;
pub mod menu;

use std::io;
use std::path::PathBuf;

pub use import::handle_import_command;
pub use menu::Menu;

use crate::config::Settings;
use crate::error::LmsResult;
use crate::storage::PatronRepository;

/// Run the interactive menu on the process streams
///
/// `load` takes precedence over the configured startup file.
pub fn handle_menu_command(settings: &Settings, load: Option<PathBuf>) -> LmsResult<()> {
    let mut repo = PatronRepository::new();
    let stdin = io::stdin();
    let mut menu = Menu::new(
        &mut repo,
        stdin.lock(),
        io::stdout(),
        io::stderr(),
        settings.list_style,
    );

    if let Some(path) = load.or_else(|| settings.startup_file.clone()) {
        menu.load_path(&path)?;
    }

    menu.run()?;
    Ok(())
}
