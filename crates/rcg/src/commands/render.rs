//! `rcg render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use rcg_config::{CliSettings, Config};

use super::transform_file;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover rcg.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wrap the output in a full HTML document (overrides config).
    #[arg(long)]
    standalone: bool,

    /// Title of the standalone document (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Do not inject the code group stylesheet and script.
    #[arg(long)]
    no_assets: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a file cannot be read or
    /// written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            inject_assets: self.no_assets.then_some(false),
            standalone: self.standalone.then_some(true),
            title: self.title,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let (doc, report) = transform_file(&self.input, &config)?;
        let html = doc.to_html();

        match &self.output {
            Some(path) => {
                write_file(path, &html)?;
                output.report(&self.input, &report);
                output.wrote(path);
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.write_all(b"\n")?;
                stdout.flush()?;
                output.report(&self.input, &report);
            }
        }

        Ok(())
    }
}

/// Write `html` to `path`, creating parent directories.
fn write_file(path: &Path, html: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.md");
        let out = dir.path().join("site").join("page.html");
        let config = dir.path().join("rcg.toml");
        std::fs::write(
            &input,
            "::: code-group labels=[npm]\n\n```sh\nnpm i\n```\n\n:::\n",
        )
        .unwrap();
        std::fs::write(&config, "[code_group.class_names]\ntab_class = \"t\"\n").unwrap();

        let args = RenderArgs {
            input,
            output: Some(out.clone()),
            config: Some(config),
            standalone: true,
            title: Some("Install".to_owned()),
            no_assets: true,
            verbose: false,
        };
        args.execute().unwrap();

        let html = std::fs::read_to_string(out).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Install</title>"));
        assert!(html.contains(r#"<button class="rcg-tab t active""#));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_render_with_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.md");
        std::fs::write(&input, "text").unwrap();

        let args = RenderArgs {
            input,
            output: Some(dir.path().join("out.html")),
            config: Some(dir.path().join("missing.toml")),
            standalone: false,
            title: None,
            no_assets: false,
            verbose: false,
        };

        assert!(matches!(args.execute(), Err(CliError::Config(_))));
    }
}
