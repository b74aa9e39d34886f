//! Search across posts and comments

use std::sync::Arc;

use super::transport::Transport;
use crate::error::Result;
use crate::types::{extract_search, SearchKind, SearchResults};

/// Search namespace of the API.
#[derive(Clone)]
pub struct Search {
    pub(crate) transport: Arc<Transport>,
}

impl Search {
    /// Semantic search. `kind` narrows the result set; `limit` caps it.
    pub async fn query(
        &self,
        q: &str,
        kind: SearchKind,
        limit: Option<u32>,
    ) -> Result<SearchResults> {
        let mut query: Vec<(&str, String)> = vec![
            ("q", q.to_string()),
            ("type", kind.as_str().to_string()),
        ];
        if let Some(n) = limit {
            query.push(("limit", n.to_string()));
        }
        let response = self.transport.get("search", &query).await?;
        extract_search(response)
    }
}
