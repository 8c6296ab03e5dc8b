//! Startup banner and session summary display.

use std::time::Duration;

use crate::consts::{FOOTER, TITLE};
use crate::requester::Trigger;
use crate::state::Phase;

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub endpoint: &'a str,
    /// Where the base URL came from: the flag/env var or the settings file.
    pub origin: &'a str,
    pub reveal_delay: Duration,
    pub timeout: Option<Duration>,
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner_text(info));
}

fn banner_text(info: &BannerInfo) -> String {
    let timeout = match info.timeout {
        Some(limit) => format!("{}s", limit.as_secs()),
        None => "none".to_string(),
    };
    format!(
        r#"
   {TITLE}
   {}

   version   {}
   endpoint  {}
   from      {}
   reveal    {}ms
   timeout   {}

   press Enter for a quote, /help for commands
"#,
        "─".repeat(TITLE.chars().count()),
        env!("CARGO_PKG_VERSION"),
        info.endpoint,
        info.origin,
        info.reveal_delay.as_millis(),
        timeout,
    )
}

/// Per-session counts of settled requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub fetched: u64,
    pub failed: u64,
}

impl SessionStats {
    pub fn record(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Settled(Phase::Success) => self.fetched += 1,
            Trigger::Settled(Phase::Failure) => self.failed += 1,
            Trigger::Settled(_) | Trigger::Ignored => {}
        }
    }

    pub fn total(&self) -> u64 {
        self.fetched + self.failed
    }
}

/// Print the session summary (request counts + farewell).
pub fn print_session_summary(stats: SessionStats) {
    if stats.total() > 0 {
        println!(
            "session: {} quote{} fetched, {} failed",
            stats.fetched,
            if stats.fetched == 1 { "" } else { "s" },
            stats.failed,
        );
    }
    println!("{FOOTER}");
    println!("goodbye.");
}
