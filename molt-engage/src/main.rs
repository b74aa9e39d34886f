//! molt-engage - Heartbeat-gated engagement pass over the feed
//!
//! Meant to be invoked by a periodic heartbeat: bail out quickly when the
//! last check is recent, otherwise fetch the feed, run the engagement
//! filter, print candidates, and record the check. With `--heartbeat`,
//! remote failures are logged and swallowed so one bad check never crashes
//! the calling agent loop; that policy lives here, not in the library.

use clap::Parser;
use libmoltbook::engagement::{relevant_posts, FeedFilter};
use libmoltbook::logging::{LogFormat, LoggingConfig};
use libmoltbook::types::PostSort;
use libmoltbook::{Config, HeartbeatGate, MoltbookClient, MoltbookError, Result};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "molt-engage")]
#[command(about = "Find feed posts worth engaging with", long_about = None)]
struct Cli {
    /// Minimum hours between checks
    #[arg(long, default_value_t = 2)]
    min_interval_hours: u64,

    /// Heartbeat state file (defaults to the configured path)
    #[arg(long)]
    state_file: Option<String>,

    /// Sort order: hot, new, top, or rising
    #[arg(short, long, default_value = "hot")]
    sort: String,

    /// Maximum number of posts to fetch
    #[arg(short, long, default_value_t = 25)]
    limit: u32,

    /// Minimum post score
    #[arg(long)]
    min_score: Option<i64>,

    /// Maximum comment count (favor under-served threads)
    #[arg(long)]
    max_comments: Option<u64>,

    /// Required keyword, any match keeps the post (repeatable)
    #[arg(short, long = "keyword")]
    keywords: Vec<String>,

    /// Excluded keyword, any match drops the post (repeatable)
    #[arg(short = 'x', long = "exclude")]
    exclude_keywords: Vec<String>,

    /// Report what would happen without recording the check
    #[arg(long)]
    dry_run: bool,

    /// Heartbeat mode: remote failures are logged and treated as a skipped
    /// check instead of an error exit
    #[arg(long)]
    heartbeat: bool,

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
    let level = if cli.verbose { "debug" } else { "info" };
    LoggingConfig::new(LogFormat::Text, level.to_string(), cli.verbose).init();

    let heartbeat = cli.heartbeat;
    match run(cli).await {
        Ok(()) => {}
        Err(e) if heartbeat && is_remote_error(&e) => {
            // A single failed check must not crash a long-running agent.
            warn!("moltbook check failed, continuing: {e}");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn is_remote_error(err: &MoltbookError) -> bool {
    matches!(
        err,
        MoltbookError::Auth(_)
            | MoltbookError::NotFound(_)
            | MoltbookError::RateLimited { .. }
            | MoltbookError::Api { .. }
            | MoltbookError::Network(_)
    )
}

async fn run(cli: Cli) -> Result<()> {
    let sort: PostSort = cli.sort.parse()?;
    let config = Config::load()?;

    let state_file = cli
        .state_file
        .clone()
        .unwrap_or_else(|| config.heartbeat.state_file.clone());
    let gate = HeartbeatGate::new(&state_file);

    if !gate.should_check(cli.min_interval_hours)? {
        info!(
            state_file,
            "checked within the last {} hours, nothing to do", cli.min_interval_hours
        );
        return Ok(());
    }

    let client = MoltbookClient::from_credentials(&config)?;
    let posts = client.feed().get(sort, Some(cli.limit)).await?;
    let fetched = posts.len();

    let filter = FeedFilter {
        min_score: cli.min_score,
        max_comments: cli.max_comments,
        keywords: cli.keywords.clone(),
        exclude_keywords: cli.exclude_keywords.clone(),
    };
    let candidates = relevant_posts(posts, &filter);
    info!(fetched, kept = candidates.len(), "engagement filter applied");

    match cli.format.as_str() {
        "json" => {
            let rendered = serde_json::to_string_pretty(&candidates)
                .map_err(|e| MoltbookError::InvalidInput(format!("failed to render JSON: {e}")))?;
            println!("{rendered}");
        }
        "text" => {
            for post in &candidates {
                println!("{}", post.summary_line());
            }
        }
        other => {
            return Err(MoltbookError::InvalidInput(format!(
                "invalid output format '{other}' (expected text or json)"
            )))
        }
    }

    if cli.dry_run {
        info!("dry run, not recording check time");
    } else {
        gate.record_check()?;
    }
    Ok(())
}
