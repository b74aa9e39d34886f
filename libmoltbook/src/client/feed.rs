//! Personalized feed (subscribed submolts plus followed agents)

use std::sync::Arc;

use super::transport::Transport;
use crate::error::Result;
use crate::types::{extract_list, Post, PostSort, POST_LIST_KEYS};

/// Feed namespace of the API. Requires an API key.
#[derive(Clone)]
pub struct Feed {
    pub(crate) transport: Arc<Transport>,
}

impl Feed {
    /// The current agent's personalized feed.
    pub async fn get(&self, sort: PostSort, limit: Option<u32>) -> Result<Vec<Post>> {
        let mut query: Vec<(&str, String)> = vec![("sort", sort.as_str().to_string())];
        if let Some(n) = limit {
            query.push(("limit", n.to_string()));
        }
        let response = self.transport.get("feed", &query).await?;
        extract_list(response, POST_LIST_KEYS)
    }
}
