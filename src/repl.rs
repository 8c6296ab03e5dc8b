//! The interactive loop.
//!
//! Input keeps being read while a request is outstanding, so a trigger typed
//! during loading reaches the requester (and is ignored there) instead of
//! queueing up behind the request.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

use crate::banner::SessionStats;
use crate::commands::{CommandRegistry, CommandResult, SessionInfo};
use crate::render;
use crate::requester::{QuoteRequester, Trigger};
use crate::spinner::Spinner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A REPL session over one requester.
pub struct Repl<'a> {
    requester: &'a QuoteRequester,
    registry: CommandRegistry,
    endpoint: &'a str,
    origin: &'a str,
    reveal_delay: Duration,
    stats: SessionStats,
    help: String,
}

impl<'a> Repl<'a> {
    pub fn new(
        requester: &'a QuoteRequester,
        endpoint: &'a str,
        origin: &'a str,
        reveal_delay: Duration,
    ) -> Self {
        let registry = CommandRegistry::new();
        let help = registry.help_text();
        Self {
            requester,
            registry,
            endpoint,
            origin,
            reveal_delay,
            stats: SessionStats::default(),
            help,
        }
    }

    /// Read commands from `input` until `/quit`, end of input or Ctrl+C.
    pub async fn run<R>(&mut self, input: R) -> Result<SessionStats>
    where
        R: AsyncBufRead + Unpin,
    {
        show(self.requester, self.reveal_delay).await?;
        let mut lines = input.lines();

        loop {
            print!("\nmuse> ");
            io::stdout().flush()?;

            let line = tokio::select! {
                result = lines.next_line() => {
                    match result {
                        Ok(Some(line)) => line,
                        Ok(None) => {
                            // Ctrl+D (EOF)
                            println!();
                            break;
                        }
                        Err(e) => {
                            eprintln!("input error: {e}");
                            break;
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    break;
                }
            };

            match self.dispatch(&line).await {
                CommandResult::Fetch => {
                    if self.press(&mut lines).await? == Flow::Quit {
                        break;
                    }
                }
                CommandResult::NotACommand => {
                    println!("press Enter for a quote, or type /help");
                }
                CommandResult::Handled => {}
                CommandResult::Quit => break,
            }
        }

        Ok(self.stats)
    }

    async fn dispatch(&self, line: &str) -> CommandResult {
        let info = SessionInfo {
            endpoint: self.endpoint,
            origin: self.origin,
            stats: self.stats,
            help: &self.help,
        };
        self.registry.dispatch(line, &info).await
    }

    /// Press the control and keep serving input until the request settles.
    async fn press<R>(&mut self, lines: &mut Lines<R>) -> Result<Flow>
    where
        R: AsyncBufRead + Unpin,
    {
        let requester = self.requester;
        let spinner = Spinner::follow(requester.subscribe());
        let request = requester.request_quote();
        tokio::pin!(request);

        let mut input_open = true;
        let trigger = loop {
            tokio::select! {
                biased;
                trigger = &mut request => break trigger,
                line = lines.next_line(), if input_open => match line {
                    Ok(Some(line)) => match self.dispatch(&line).await {
                        CommandResult::Fetch => {
                            let ignored = requester.request_quote().await;
                            debug!(?ignored, "trigger while loading");
                        }
                        CommandResult::Quit => {
                            spinner.stop().await;
                            return Ok(Flow::Quit);
                        }
                        CommandResult::NotACommand | CommandResult::Handled => {}
                    },
                    // Out of input: let the request settle, then leave.
                    Ok(None) | Err(_) => input_open = false,
                },
                _ = tokio::signal::ctrl_c() => {
                    // Abandons the wait; the request state is left as is.
                    spinner.stop().await;
                    println!("\n\ninterrupted");
                    return Ok(Flow::Quit);
                }
            }
        };

        spinner.stop().await;
        self.stats.record(trigger);
        show(requester, self.reveal_delay).await?;

        Ok(if input_open { Flow::Continue } else { Flow::Quit })
    }
}

/// Wait out the reveal delay if a quote is pending, then print the frame.
pub async fn show(requester: &QuoteRequester, reveal_delay: Duration) -> io::Result<()> {
    let state = requester.state();
    if let Some(wait) = state.reveal_remaining(Instant::now(), reveal_delay) {
        tokio::time::sleep(wait).await;
    }
    let mut out = io::stdout().lock();
    write!(out, "{}", render::frame(&state, Instant::now(), reveal_delay))?;
    out.flush()
}

/// Single request mode: one press, one frame.
pub async fn once(requester: &QuoteRequester, reveal_delay: Duration) -> Result<Trigger> {
    let spinner = Spinner::follow(requester.subscribe());
    let trigger = requester.request_quote().await;
    spinner.stop().await;
    show(requester, reveal_delay).await?;
    Ok(trigger)
}
