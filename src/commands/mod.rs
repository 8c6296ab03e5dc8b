//! REPL commands.
//!
//! Commands implement the [`Command`] trait and are listed in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! and help generation. An empty line is the same as `/quote`.

mod endpoint;
mod help;
mod quit;
mod quote;

use async_trait::async_trait;
use std::sync::Arc;

use crate::banner::SessionStats;

/// Session info available to commands during execution.
pub struct SessionInfo<'a> {
    pub endpoint: &'a str,
    pub origin: &'a str,
    pub stats: SessionStats,
    /// Output of [`CommandRegistry::help_text`].
    pub help: &'a str,
}

/// What the REPL should do after a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// Not a command.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Press the trigger control.
    Fetch,
    /// Exit the REPL.
    Quit,
}

/// A REPL command.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/quote"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["get", "g"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult;
}

pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(quote::QuoteCommand),
            Arc::new(endpoint::EndpointCommand),
            Arc::new(help::HelpCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, info: &SessionInfo<'_>) -> CommandResult {
        let cmd = match input.trim() {
            "" => "/quote",
            other => other,
        };

        for command in &self.commands {
            if cmd == command.name() || command.aliases().contains(&cmd) {
                return command.execute(info).await;
            }
        }

        if cmd.starts_with('/') {
            println!("unknown command: {cmd}");
            println!("type /help for available commands");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    /// Generate help text from all commands.
    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out
    }

}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, aliases: &[&str]) -> String {
    if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, aliases.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn test_info() -> SessionInfo<'static> {
        SessionInfo {
            endpoint: "http://localhost:8080/quote",
            origin: ":memory:",
            stats: SessionStats::default(),
            help: "  /quote (get, g)  fetch a quote\n",
        }
    }

    #[test]
    fn all_builtins_registered() {
        let reg = CommandRegistry::new();
        let names: Vec<&str> = reg.commands.iter().map(|c| c.name()).collect();
        for name in ["/quote", "/endpoint", "/help", "/quit"] {
            assert!(names.contains(&name), "missing: {name}");
        }
    }

    #[test]
    fn no_duplicate_triggers() {
        let reg = CommandRegistry::new();
        let triggers = reg
            .commands
            .iter()
            .flat_map(|c| std::iter::once(c.name()).chain(c.aliases().iter().copied()));
        let mut seen = Vec::new();
        for t in triggers {
            assert!(!seen.contains(&t), "duplicate trigger: {t}");
            seen.push(t);
        }
    }

    #[test]
    fn help_text_includes_all_commands() {
        let reg = CommandRegistry::new();
        let text = reg.help_text();
        for command in &reg.commands {
            assert!(text.contains(command.name()), "help missing: {}", command.name());
        }
        assert!(text.contains("get"));
    }

    #[tokio::test]
    async fn empty_line_fetches() {
        let reg = CommandRegistry::new();
        assert_eq!(reg.dispatch("", &test_info()).await, CommandResult::Fetch);
        assert_eq!(reg.dispatch("   ", &test_info()).await, CommandResult::Fetch);
    }

    #[tokio::test]
    async fn help_is_handled() {
        let reg = CommandRegistry::new();
        assert_eq!(reg.dispatch("/help", &test_info()).await, CommandResult::Handled);
        assert_eq!(reg.dispatch("/?", &test_info()).await, CommandResult::Handled);
    }

    #[tokio::test]
    async fn unknown_slash_command_is_handled() {
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.dispatch("/foobar", &test_info()).await,
            CommandResult::Handled
        );
    }

    #[tokio::test]
    async fn plain_text_is_not_a_command() {
        let reg = CommandRegistry::new();
        assert_eq!(
            reg.dispatch("inspire me", &test_info()).await,
            CommandResult::NotACommand
        );
    }

    #[test]
    fn format_label_with_aliases() {
        assert_eq!(format_label("/help", &["/h", "/?"]), "/help (/h, /?)");
        assert_eq!(format_label("/endpoint", &[]), "/endpoint");
    }
}
