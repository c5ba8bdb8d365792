//! Terminal output for transform results.
//!
//! Everything the CLI tells the user goes to stderr, so `rcg render` can
//! stream HTML on stdout.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};
use rcg_transform::TransformReport;

/// How a line is colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    Plain,
    Success,
    Warning,
    Error,
}

/// Styled stderr writer for the `render` and `check` commands.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Print every warning of `report`, then a one-line summary for `input`.
    pub(crate) fn report(&self, input: &Path, report: &TransformReport) {
        for (tone, line) in report_lines(input, report) {
            self.line(tone, &line);
        }
    }

    /// Confirm that rendered HTML was written to `path`.
    pub(crate) fn wrote(&self, path: &Path) {
        self.line(Tone::Success, &format!("Wrote {}", path.display()));
    }

    /// Confirm that `rcg check` found no unmatched markers in `input`.
    pub(crate) fn check_passed(&self, input: &Path) {
        self.line(
            Tone::Success,
            &format!("{}: all code group markers matched", input.display()),
        );
    }

    /// Print a fatal error.
    pub(crate) fn error(&self, err: &dyn Display) {
        self.line(Tone::Error, &format!("Error: {err}"));
    }

    fn line(&self, tone: Tone, msg: &str) {
        let styled = match tone {
            Tone::Plain => msg.to_owned(),
            Tone::Success => self.green.apply_to(msg).to_string(),
            Tone::Warning => self.yellow.apply_to(msg).to_string(),
            Tone::Error => self.red.apply_to(msg).to_string(),
        };
        let _ = self.term.write_line(&styled);
    }
}

/// Lines printed for a transform report, warnings first.
fn report_lines(input: &Path, report: &TransformReport) -> Vec<(Tone, String)> {
    let input = input.display();
    let mut lines: Vec<(Tone, String)> = report
        .warnings
        .iter()
        .map(|warning| (Tone::Warning, format!("{input}: {warning}")))
        .collect();

    let mut summary = format!(
        "{input}: {} code group(s), {} warning(s)",
        report.groups_rewritten,
        report.warnings.len()
    );
    if report.assets_injected {
        summary.push_str(", assets injected");
    }
    lines.push((Tone::Plain, summary));
    lines
}
