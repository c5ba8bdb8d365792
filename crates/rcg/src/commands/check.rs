//! `rcg check` command implementation.

use std::path::PathBuf;

use clap::Args;
use rcg_config::Config;

use super::transform_file;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Markdown file to check.
    input: PathBuf,

    /// Path to configuration file (default: auto-discover rcg.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read, or
    /// the document has unmatched code group markers.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let (_, report) = transform_file(&self.input, &config)?;
        output.report(&self.input, &report);

        if !report.is_clean() {
            return Err(CliError::Validation(format!(
                "{}: {} unmatched ::: and {} unclosed ::: code-group marker(s)",
                self.input.display(),
                report.unmatched_end_markers,
                report.unclosed_start_markers
            )));
        }

        output.check_passed(&self.input);
        Ok(())
    }
}
