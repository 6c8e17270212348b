//! Command-line argument parsing for the reploit CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: reploit [COMMAND]

Commands:
  chat               Interactive conversation (default)
  ask <question...>  Ask one question and print the answer
  health             Check that the backend is reachable
  index <repo_url>   Ask the backend to index a repository

Options:
  -h, --help         Print this help
  -V, --version      Print the version

In chat, Ctrl+C cancels the answer in progress; /quit or Ctrl+D exits.

Environment:
  REPLOIT_API_URL               Backend URL (default http://127.0.0.1:8000)
  REPLOIT_API_KEY               Sent as X-User-API-Key
  REPLOIT_REPO_URL              Repository the conversation is about
  REPLOIT_CONNECT_TIMEOUT_SECS  Connect timeout (default 10)
  REPLOIT_IDLE_TIMEOUT_SECS     Give up when the stream is silent this long
  RUST_LOG                      Log filter for stderr (default reploit=warn)";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the interactive conversation (default)
    Chat,
    /// Ask a single question
    Ask(String),
    /// Probe the backend
    Health,
    /// Trigger indexing of a repository
    Index(String),
    /// Arguments that make no sense; carries the complaint
    Invalid(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use reploit::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["reploit".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);

    let Some(first) = args.next() else {
        return CliCommand::Chat;
    };

    match first.as_str() {
        "--version" | "-V" => CliCommand::Version,
        "--help" | "-h" => CliCommand::Help,
        "chat" => CliCommand::Chat,
        "health" => CliCommand::Health,
        "ask" => {
            let question = args.collect::<Vec<_>>().join(" ");
            if question.trim().is_empty() {
                CliCommand::Invalid("ask needs a question".to_string())
            } else {
                CliCommand::Ask(question)
            }
        }
        "index" => match args.next() {
            Some(url) if !url.trim().is_empty() => CliCommand::Index(url),
            _ => CliCommand::Invalid("index needs a repository URL".to_string()),
        },
        other => CliCommand::Invalid(format!("unknown command '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["reploit".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::Chat);
        assert_eq!(parse(&["chat"]), CliCommand::Chat);
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_help_flags() {
        assert_eq!(parse(&["--help"]), CliCommand::Help);
        assert_eq!(parse(&["-h"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_ask_joins_words() {
        assert_eq!(
            parse(&["ask", "What", "does", "X", "do?"]),
            CliCommand::Ask("What does X do?".to_string())
        );
    }

    #[test]
    fn test_parse_ask_without_question() {
        assert!(matches!(parse(&["ask"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(
            parse(&["index", "https://github.com/owner/repo"]),
            CliCommand::Index("https://github.com/owner/repo".to_string())
        );
        assert!(matches!(parse(&["index"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_health() {
        assert_eq!(parse(&["health"]), CliCommand::Health);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse(&["--unknown"]),
            CliCommand::Invalid("unknown command '--unknown'".to_string())
        );
    }
}
