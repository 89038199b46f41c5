//! Interactive designer command.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::logging;
use crate::models::{FormEvent, FormState};
use crate::tui::{self, AppState};
use clap::Args;
use std::path::PathBuf;

/// Open the interactive QR designer
#[derive(Debug, Clone, Default, Args)]
pub struct TuiArgs {
    /// Text or URL to start with (defaults to the configured payload)
    #[arg(short, long, value_name = "TEXT")]
    pub data: Option<String>,

    /// Logo image to load on startup
    #[arg(long, value_name = "FILE")]
    pub logo: Option<PathBuf>,
}

impl TuiArgs {
    /// Builds the starting form from the configured defaults.
    fn initial_form(&self, config: &Config) -> FormState {
        let mut form = FormState::new(&config.defaults);
        if let Some(data) = &self.data {
            form.apply(FormEvent::SetData(data.clone()));
        }
        form
    }

    /// Execute the tui command
    pub fn execute(&self, verbose: bool) -> CliResult<()> {
        match logging::init_file(verbose) {
            Ok(path) => tracing::info!("Logging to {}", path.display()),
            // Without a log file the TUI still works; stderr is hidden behind it
            Err(e) => eprintln!("Warning: file logging disabled: {e:#}"),
        }

        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let form = self.initial_form(&config);
        let mut state = AppState::new(config, form);
        if let Some(path) = &self.logo {
            state.load_logo(path.clone());
        }

        tracing::info!("Starting TUI");
        tui::launch(&mut state).map_err(|e| CliError::io(format!("Terminal error: {e:#}")))?;
        tracing::info!("TUI closed");
        Ok(())
    }
}
