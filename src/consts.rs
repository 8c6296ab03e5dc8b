//! Project-wide constants.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable holding the quote endpoint's base URL.
pub const ENV_BASE_URL: &str = "MUSE_API_URL";

/// Path segment appended to the base URL for every request.
pub const QUOTE_PATH: &str = "quote";

/// Sent with every outbound request.
pub const USER_AGENT: &str = concat!("muse/", env!("CARGO_PKG_VERSION"));

/// Delay between a successful fetch and the quote being revealed.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 100;

pub const TITLE: &str = "Motivational Quotes 🚀";
pub const FOOTER: &str = "Get motivated with inspiring quotes ✨";

pub const GET_LABEL: &str = "Get Quote";
pub const LOADING_LABEL: &str = "Loading...";
pub const PLACEHOLDER: &str = "Press Enter to get inspired!";

/// The only failure text a user ever sees.
pub const ERROR_MESSAGE: &str = "Failed to fetch quote. Please try again.";
pub const ERROR_HINT: &str = "Please check your connection and try again.";

/// Default settings database: `~/.muse/muse.db`.
pub fn default_settings_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".muse").join("muse.db"))
}
