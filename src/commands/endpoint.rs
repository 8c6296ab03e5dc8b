use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct EndpointCommand;

#[async_trait]
impl Command for EndpointCommand {
    fn name(&self) -> &str {
        "/endpoint"
    }

    fn description(&self) -> &str {
        "show the quote endpoint and session counts"
    }

    async fn execute(&self, info: &SessionInfo<'_>) -> CommandResult {
        println!("  endpoint  {}", info.endpoint);
        println!("  from      {}", info.origin);
        println!(
            "  session   {} fetched, {} failed",
            info.stats.fetched, info.stats.failed
        );
        CommandResult::Handled
    }
}
