//! Simple line-based transcript output.

use std::io::{self, Write};

use crate::models::{Message, MessageRole};

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Prompt shown before each question in chat mode.
pub const PROMPT: &str = "> ";

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const PROGRESS: &str = "…";
}

/// Print the main header.
///
/// ```text
/// REPLOIT 0.1.0
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
}

/// Render one transcript entry.
///
/// ```text
/// agent> X does Y.
/// ```
pub fn format_message(message: &Message) -> String {
    let speaker = match message.role {
        MessageRole::User => "you",
        MessageRole::Assistant => "agent",
    };

    let mut lines = message.content.lines();
    let first = lines.next().unwrap_or_default();
    let indent = " ".repeat(speaker.len() + 2);

    let mut out = format!("{}> {}", speaker, first);
    for line in lines {
        out.push('\n');
        out.push_str(&indent);
        out.push_str(line);
    }
    out
}

pub fn print_message(message: &Message) {
    println!("{}", format_message(message));
}

/// Print assistant messages only; the user's own lines are already on screen.
pub fn print_replies<'a, I>(messages: I)
where
    I: IntoIterator<Item = &'a Message>,
{
    for message in messages {
        if !message.is_user() {
            print_message(message);
        }
    }
}

pub fn format_status(status: &str) -> String {
    format!("  {} {}", icons::PROGRESS, status)
}

/// Print a transient status line.
pub fn print_status(status: &str) {
    println!("{}", format_status(status));
}

pub fn format_banner(message: &str) -> String {
    format!("Error: {}", message)
}

/// Print the error banner to stderr.
pub fn print_error_banner(message: &str) {
    eprintln!("{}", format_banner(message));
}

pub fn format_hint(hint: &str) -> String {
    format!("  {}", hint)
}

/// Print a recovery hint under the error banner.
pub fn print_hint(hint: &str) {
    eprintln!("{}", format_hint(hint));
}

/// Print a one-line result with an icon.
pub fn print_result_line(icon: &str, message: &str) {
    println!("{} {}", icon, message);
}

/// Print the chat prompt without a newline.
pub fn print_prompt() {
    print!("{}", PROMPT);
    io::stdout().flush().ok();
}
