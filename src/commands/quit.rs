use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct QuitCommand;

#[async_trait]
impl Command for QuitCommand {
    fn name(&self) -> &str {
        "/quit"
    }

    fn aliases(&self) -> &[&str] {
        &["quit", "exit", "/exit", "q"]
    }

    fn description(&self) -> &str {
        "leave muse"
    }

    async fn execute(&self, _info: &SessionInfo<'_>) -> CommandResult {
        CommandResult::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandRegistry;
    use crate::commands::tests::test_info;

    #[tokio::test]
    async fn every_alias_quits() {
        let reg = CommandRegistry::new();
        for input in ["/quit", "quit", "exit", "/exit", "q"] {
            assert_eq!(
                reg.dispatch(input, &test_info()).await,
                CommandResult::Quit,
                "{input} should quit"
            );
        }
    }
}
