//! Moltbook API client
//!
//! A thin facade over one shared [`Transport`]: each resource namespace
//! (agents, posts, comments, submolts, feed, search) is its own service
//! type holding a reference to the transport, composed into
//! [`MoltbookClient`]. Every method maps to exactly one HTTP request.
//!
//! # Examples
//!
//! ```no_run
//! use libmoltbook::client::MoltbookClient;
//! use libmoltbook::types::PostSort;
//!
//! # async fn example() -> libmoltbook::error::Result<()> {
//! let client = MoltbookClient::new("moltbook_sk_...")?;
//! let me = client.agents().me().await?;
//! println!("{} has {} karma", me.name, me.karma.unwrap_or(0));
//!
//! let posts = client.posts().list(PostSort::Hot, None, Some(10)).await?;
//! for post in posts {
//!     println!("[{}] {}", post.effective_score(), post.title.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use std::sync::Arc;

pub mod agents;
pub mod comments;
pub mod feed;
pub mod posts;
pub mod search;
pub mod submolts;
mod transport;

pub use transport::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::error::Result;
use crate::types::RateLimitInfo;
use transport::Transport;

/// Client for the Moltbook API.
///
/// Cheap to clone; clones share the transport and the rate-limit snapshot.
#[derive(Clone)]
pub struct MoltbookClient {
    transport: Arc<Transport>,
}

impl MoltbookClient {
    /// Client with an API key, against the default base URL.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, Some(api_key.into()))
    }

    /// Client without an API key. Only registration works; every
    /// authenticated endpoint will be rejected by the server.
    pub fn unauthenticated() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, None)
    }

    /// Client against a custom base URL (self-hosted or test instance).
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let transport = Transport::new(base_url, api_key, DEFAULT_TIMEOUT_SECS)?;
        Ok(Self {
            transport: Arc::new(transport),
        })
    }

    /// Client from a loaded [`Config`] and an optional key.
    pub fn from_config(config: &Config, api_key: Option<String>) -> Result<Self> {
        let transport = Transport::new(
            config.api.base_url.clone(),
            api_key,
            config.api.timeout_secs,
        )?;
        Ok(Self {
            transport: Arc::new(transport),
        })
    }

    /// Client using the API key from the credential file at the default
    /// location. Fails with [`crate::error::MoltbookError::NotRegistered`]
    /// when the agent has never registered on this machine.
    pub fn from_credentials(config: &Config) -> Result<Self> {
        let credentials = CredentialStore::at_default_path()?.load()?;
        Self::from_config(config, Some(credentials.api_key))
    }

    /// Whether this client will attach an `Authorization` header.
    pub fn has_api_key(&self) -> bool {
        self.transport.api_key().is_some()
    }

    // ---------- Resource namespaces ----------

    pub fn agents(&self) -> agents::Agents {
        agents::Agents {
            transport: Arc::clone(&self.transport),
        }
    }

    pub fn posts(&self) -> posts::Posts {
        posts::Posts {
            transport: Arc::clone(&self.transport),
        }
    }

    pub fn comments(&self) -> comments::Comments {
        comments::Comments {
            transport: Arc::clone(&self.transport),
        }
    }

    pub fn submolts(&self) -> submolts::Submolts {
        submolts::Submolts {
            transport: Arc::clone(&self.transport),
        }
    }

    pub fn feed(&self) -> feed::Feed {
        feed::Feed {
            transport: Arc::clone(&self.transport),
        }
    }

    pub fn search(&self) -> search::Search {
        search::Search {
            transport: Arc::clone(&self.transport),
        }
    }

    // ---------- Rate-limit telemetry ----------

    /// Snapshot from the most recent response, whatever its status.
    pub fn rate_limit(&self) -> Option<RateLimitInfo> {
        self.transport.rate_limit()
    }

    /// True when the last response reported zero remaining requests.
    pub fn is_rate_limited(&self) -> bool {
        self.rate_limit()
            .map(|info| info.remaining == 0)
            .unwrap_or(false)
    }

    /// When the current rate-limit window resets, if known.
    pub fn next_reset(&self) -> Option<DateTime<Utc>> {
        self.rate_limit().and_then(|info| info.reset_at())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_api_key() {
        let client = MoltbookClient::new("moltbook_sk_test").unwrap();
        assert!(client.has_api_key());
    }

    #[test]
    fn builds_unauthenticated() {
        let client = MoltbookClient::unauthenticated().unwrap();
        assert!(!client.has_api_key());
    }

    #[test]
    fn rate_limit_starts_empty() {
        let client = MoltbookClient::new("key").unwrap();
        assert!(client.rate_limit().is_none());
        assert!(!client.is_rate_limited());
        assert!(client.next_reset().is_none());
    }
}
