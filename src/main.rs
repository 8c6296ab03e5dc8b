use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use muse::banner::{BannerInfo, print_banner, print_session_summary};
use muse::config::store::Settings;
use muse::config::{self, Endpoint};
use muse::consts::{DEFAULT_REVEAL_DELAY_MS, default_settings_path};
use muse::repl::{self, Repl};
use muse::requester::{QuoteRequester, Trigger};
use muse::source::http::HttpSource;
use muse::state::Phase;

#[derive(Parser)]
#[command(name = "muse", version, about = "Ask a quote endpoint for a little motivation.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Base URL of the quote endpoint; requests go to {base}/quote
    #[arg(short, long, env = "MUSE_API_URL")]
    base_url: Option<String>,

    /// SQLite settings database [default: ~/.muse/muse.db]
    #[arg(short, long)]
    db: Option<PathBuf>,

    /// Delay before a fetched quote is revealed, in milliseconds
    #[arg(long, default_value_t = DEFAULT_REVEAL_DELAY_MS)]
    reveal_delay_ms: u64,

    /// Give up on a request after this many seconds (default: wait forever)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Fetch one quote and exit (non-interactive)
    #[arg(long, default_value_t = false)]
    once: bool,

    /// Skip the startup banner
    #[arg(long, default_value_t = false)]
    no_banner: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the stored quote endpoint
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the stored base URL
    Show,
    /// Store a base URL, used when neither --base-url nor MUSE_API_URL is set
    Set { url: String },
    /// Forget the stored base URL
    Unset,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    if let Some(Command::Config { action }) = &cli.command {
        let (settings, _) = open_settings(cli.db.as_deref())?;
        handle_config(action, &settings)?;
        return Ok(ExitCode::SUCCESS);
    }

    // The settings store is only opened when no explicit URL was given.
    let mut origin = String::from("--base-url / MUSE_API_URL");
    let endpoint = config::resolve(cli.base_url.as_deref(), || {
        let (settings, path) = open_settings(cli.db.as_deref())?;
        origin = path;
        settings.base_url()
    })?;
    let reveal_delay = Duration::from_millis(cli.reveal_delay_ms);
    let timeout = cli.timeout.map(Duration::from_secs);
    info!(endpoint = %endpoint, %origin, ?timeout, "quote endpoint configured");

    let source = HttpSource::new(&endpoint)
        .context("failed to build HTTP client")?
        .with_timeout(timeout);
    let requester = QuoteRequester::new(Arc::new(source));

    // Single request mode
    if cli.once {
        let trigger = repl::once(&requester, reveal_delay).await?;
        return Ok(if trigger == Trigger::Settled(Phase::Success) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let endpoint_label = endpoint.to_string();
    if !cli.no_banner {
        print_banner(&BannerInfo {
            endpoint: &endpoint_label,
            origin: &origin,
            reveal_delay,
            timeout,
        });
    }

    // Async stdin so Ctrl+C is caught at the prompt too
    let mut session = Repl::new(&requester, &endpoint_label, &origin, reveal_delay);
    let stats = session.run(BufReader::new(tokio::io::stdin())).await?;

    print_session_summary(stats);
    Ok(ExitCode::SUCCESS)
}

fn open_settings(db: Option<&Path>) -> Result<(Settings, String)> {
    let path = match db {
        Some(path) => path.to_path_buf(),
        None => default_settings_path()?,
    };
    let label = path
        .to_str()
        .context("settings path is not valid UTF-8")?
        .to_string();
    let settings = Settings::open(&label)?;
    Ok((settings, label))
}

fn handle_config(action: &ConfigAction, settings: &Settings) -> Result<()> {
    match action {
        ConfigAction::Show => match settings.base_url()? {
            Some(url) => println!("{url}"),
            None => println!("no base URL stored (set one with `muse config set <URL>`)"),
        },
        ConfigAction::Set { url } => {
            let endpoint = Endpoint::parse(url)?;
            settings.set_base_url(&endpoint)?;
            println!("✓ quotes will come from {endpoint}");
        }
        ConfigAction::Unset => {
            settings.clear_base_url()?;
            println!("✓ stored base URL removed");
        }
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "muse=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
