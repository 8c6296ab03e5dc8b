use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        "/help"
    }

    fn aliases(&self) -> &[&str] {
        &["/h", "/?"]
    }

    fn description(&self) -> &str {
        "show this help"
    }

    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult {
        print!("{}", info.help);
        CommandResult::Handled
    }
}
