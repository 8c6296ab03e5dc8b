use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct QuoteCommand;

#[async_trait]
impl Command for QuoteCommand {
    fn name(&self) -> &str {
        "/quote"
    }

    fn aliases(&self) -> &[&str] {
        &["get", "g"]
    }

    fn description(&self) -> &str {
        "get a quote (same as pressing Enter)"
    }

    async fn execute(&self, _info: &SessionInfo<'_>) -> CommandResult {
        CommandResult::Fetch
    }
}
