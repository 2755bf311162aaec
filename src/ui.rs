//! Console output and the poll spinner.

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Data lines and errors only.
    Quiet,
    #[default]
    Normal,
    /// Everything, including per-poll status lines.
    Verbose,
}

impl OutputMode {
    /// Whether progress and status messages are shown.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Whether each individual poll is reported.
    pub fn shows_polls(&self) -> bool {
        matches!(self, Self::Verbose)
    }
}

/// Styling for console messages.
#[derive(Debug, Clone)]
pub struct Theme {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub dim: Style,
    pub highlight: Style,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
        }
    }

    /// Theme without colors (non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // NO_COLOR convention: https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    console::Term::stdout().is_term()
}

/// Console writer that respects the output mode.
#[derive(Debug)]
pub struct Output {
    mode: OutputMode,
    theme: Theme,
}

impl Output {
    pub fn new(mode: OutputMode, colors: bool) -> Self {
        let theme = if colors { Theme::new() } else { Theme::plain() };
        Self { mode, theme }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Status line, suppressed in quiet mode.
    pub fn status(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    /// Data line (run ids, rendered output). Never suppressed.
    pub fn result(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn success(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    pub fn warning(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_warning(msg));
        }
    }

    /// Errors always print, to stderr.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    pub fn skipped(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_skipped(msg));
        }
    }

    /// Spinner for a wait; hidden when status output is suppressed.
    pub fn spinner(&self, message: &str) -> PollSpinner {
        if self.mode.shows_status() {
            PollSpinner::new(message, self.theme.clone())
        } else {
            PollSpinner::hidden(self.theme.clone())
        }
    }
}

/// Spinner shown while polling a run.
pub struct PollSpinner {
    bar: ProgressBar,
    theme: Theme,
}

impl PollSpinner {
    fn new(message: &str, theme: Theme) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.magenta} {msg}")
                .unwrap(),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar, theme }
    }

    fn hidden(theme: Theme) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme,
        }
    }

    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    pub fn finish_success(&self, msg: &str) {
        self.bar
            .set_style(ProgressStyle::default_spinner().template("{msg}").unwrap());
        self.bar
            .finish_with_message(self.theme.format_success(msg));
    }

    pub fn finish_error(&self, msg: &str) {
        self.bar
            .set_style(ProgressStyle::default_spinner().template("{msg}").unwrap());
        self.bar.finish_with_message(self.theme.format_error(msg));
    }

    /// Remove the spinner without a closing line.
    pub fn finish_clear(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_mode_suppresses_status() {
        assert!(!OutputMode::Quiet.shows_status());
        assert!(OutputMode::Normal.shows_status());
        assert!(OutputMode::Verbose.shows_status());
    }

    #[test]
    fn only_verbose_shows_polls() {
        assert!(!OutputMode::Quiet.shows_polls());
        assert!(!OutputMode::Normal.shows_polls());
        assert!(OutputMode::Verbose.shows_polls());
    }

    #[test]
    fn plain_theme_keeps_icons() {
        let theme = Theme::plain();
        assert!(theme.format_success("done").contains('✓'));
        assert!(theme.format_warning("careful").contains('⚠'));
        assert!(theme.format_error("broken").contains('✗'));
        assert!(theme.format_skipped("skipped").contains('○'));
    }

    #[test]
    fn spinner_lifecycle_does_not_panic() {
        let spinner = PollSpinner::new("waiting...", Theme::plain());
        spinner.set_message("still waiting");
        spinner.finish_success("done");

        let spinner = PollSpinner::hidden(Theme::plain());
        spinner.finish_error("broken");
    }

    #[test]
    fn output_carries_its_mode() {
        let output = Output::new(OutputMode::Quiet, false);
        assert_eq!(output.mode(), OutputMode::Quiet);
    }
}
