//! Visual theme and styling.

use console::Style;

/// Terminal theme.
#[derive(Debug, Clone)]
pub struct Pep723Theme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for commands shown in output (dim italic).
    pub command: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
    /// Style for contextual hints (magenta dim).
    pub hint: Style,
}

impl Default for Pep723Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Pep723Theme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            command: Style::new().dim().italic(),
            border: Style::new().dim(),
            hint: Style::new().magenta().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            command: Style::new(),
            border: Style::new(),
            hint: Style::new(),
        }
    }

    /// Pick [`new`](Self::new) or [`plain`](Self::plain) from the environment.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
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

/// Lines of the boxed "command + output" block shown when an install fails.
pub fn render_error_block(theme: &Pep723Theme, command: &str, output: &str) -> Vec<String> {
    let rule = |text: &str| format!("    {}", theme.border.apply_to(text));
    let body = |text: &str| format!("    {} {}", theme.border.apply_to("│"), text);

    let mut lines = vec![
        rule("┌─ Command ──────────────────────────"),
        body(&theme.command.apply_to(command).to_string()),
    ];
    if !output.is_empty() {
        lines.push(rule("├─ Output ───────────────────────────"));
        lines.extend(output.lines().map(body));
    }
    lines.push(rule("└────────────────────────────────────"));
    lines
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
