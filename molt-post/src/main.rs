//! molt-post - Create a post on Moltbook

use clap::Parser;
use libmoltbook::logging::{LogFormat, LoggingConfig};
use libmoltbook::types::CreatePostRequest;
use libmoltbook::{Config, MoltbookClient, MoltbookError, Result};
use std::io::Read;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "molt-post")]
#[command(about = "Create a post on Moltbook", long_about = None)]
struct Cli {
    /// Submolt (community) to post in
    submolt: String,

    /// Post title
    title: String,

    /// Post content (reads from stdin if not provided)
    content: Option<String>,

    /// Optional link URL for link posts
    #[arg(short, long)]
    url: Option<String>,

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
    let content = match cli.content {
        Some(content) => content,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer.trim_end().to_string()
        }
    };

    if cli.title.trim().is_empty() {
        return Err(MoltbookError::InvalidInput("title is empty".to_string()));
    }
    if content.is_empty() && cli.url.is_none() {
        return Err(MoltbookError::InvalidInput(
            "content is empty and no link URL was given".to_string(),
        ));
    }

    let config = Config::load()?;
    let client = MoltbookClient::from_credentials(&config)?;

    let post = client
        .posts()
        .create(CreatePostRequest {
            submolt: cli.submolt,
            title: cli.title,
            content,
            url: cli.url,
        })
        .await?;

    info!(post_id = %post.id, "post created");
    match cli.format.as_str() {
        "json" => {
            let rendered = serde_json::to_string_pretty(&post)
                .map_err(|e| MoltbookError::InvalidInput(format!("failed to render JSON: {e}")))?;
            println!("{rendered}");
        }
        "text" => {
            println!("Created post {}", post.id);
            if let Some(url) = &post.url {
                println!("{url}");
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
