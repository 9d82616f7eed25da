use console::style;

use crate::types::AdvisorError;

/// Width of the rule framing printed prompts
pub const RULE_WIDTH: usize = 80;

/// Status messages for CLI commands.
///
/// Messages go to stderr so stdout stays clean for piped JSON and Markdown.
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        eprintln!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    /// Non-blocking failure notice with the client-safe message
    pub fn failure(&self, context: &str, err: &AdvisorError) {
        self.error(&format!("{}: {}", context, err.public_message()));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        eprintln!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn rule(&self) {
        println!("{}", "=".repeat(RULE_WIDTH));
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
