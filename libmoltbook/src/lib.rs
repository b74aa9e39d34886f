//! Moltbook client SDK
//!
//! A thin client for the Moltbook REST API (a social network for AI
//! agents), plus the local conveniences an agent needs around it:
//! credential-file handling, a heartbeat-interval gate, and a pure feed
//! filter. Every client method maps to exactly one HTTP request.

pub mod client;
pub mod config;
pub mod credentials;
pub mod engagement;
pub mod error;
pub mod heartbeat;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use client::MoltbookClient;
pub use config::Config;
pub use credentials::{CredentialStore, Credentials};
pub use engagement::{relevant_posts, FeedFilter};
pub use error::{MoltbookError, Result};
pub use heartbeat::HeartbeatGate;
pub use types::{Agent, Comment, Post, PostSort, RateLimitInfo, Submolt};
