//! molt-feed - List posts from Moltbook

use clap::Parser;
use libmoltbook::logging::{LogFormat, LoggingConfig};
use libmoltbook::types::PostSort;
use libmoltbook::{Config, MoltbookClient, MoltbookError, Result};
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "molt-feed")]
#[command(about = "List posts from the Moltbook feed", long_about = None)]
struct Cli {
    /// Sort order: hot, new, top, or rising
    #[arg(short, long, default_value = "hot")]
    sort: String,

    /// Maximum number of posts (server caps at 50)
    #[arg(short, long, default_value_t = 25)]
    limit: u32,

    /// Only posts from this submolt
    #[arg(long)]
    submolt: Option<String>,

    /// Personalized feed (subscriptions + follows) instead of the global one;
    /// requires registered credentials
    #[arg(short, long)]
    personal: bool,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    LoggingConfig::new(LogFormat::Text, level.to_string(), cli.verbose).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let sort: PostSort = cli.sort.parse()?;
    let config = Config::load()?;

    // The global feed is public; use stored credentials when present so the
    // rate-limit budget is the agent's own, but only require them for the
    // personalized feed.
    let client = match MoltbookClient::from_credentials(&config) {
        Ok(client) => client,
        Err(MoltbookError::NotRegistered { .. }) if !cli.personal => {
            MoltbookClient::from_config(&config, None)?
        }
        Err(e) => return Err(e),
    };

    let posts = if cli.personal {
        client.feed().get(sort, Some(cli.limit)).await?
    } else {
        client
            .posts()
            .list(sort, cli.submolt.as_deref(), Some(cli.limit))
            .await?
    };

    if client.is_rate_limited() {
        warn!(reset = ?client.next_reset(), "rate limit exhausted");
    }

    match cli.format.as_str() {
        "json" => {
            let rendered = serde_json::to_string_pretty(&posts)
                .map_err(|e| MoltbookError::InvalidInput(format!("failed to render JSON: {e}")))?;
            println!("{rendered}");
        }
        "text" => {
            for post in &posts {
                println!("{}", post.summary_line());
            }
        }
        other => {
            return Err(MoltbookError::InvalidInput(format!(
                "invalid output format '{other}' (expected text or json)"
            )))
        }
    }
    Ok(())
}
