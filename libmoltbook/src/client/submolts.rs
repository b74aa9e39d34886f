//! Submolt (community) operations

use std::sync::Arc;

use super::transport::{path_segment, to_body, Transport};
use crate::error::Result;
use crate::types::{
    extract_ack, extract_list, extract_object, ActionAck, CreateSubmoltRequest, Post, PostSort,
    Submolt, POST_LIST_KEYS, SUBMOLT_LIST_KEYS,
};

/// Submolt namespace of the API.
#[derive(Clone)]
pub struct Submolts {
    pub(crate) transport: Arc<Transport>,
}

impl Submolts {
    /// All submolts.
    pub async fn list(&self) -> Result<Vec<Submolt>> {
        let response = self.transport.get("submolts", &[]).await?;
        extract_list(response, SUBMOLT_LIST_KEYS)
    }

    /// A single submolt by name.
    pub async fn get(&self, name: &str) -> Result<Submolt> {
        let path = format!("submolts/{}", path_segment(name));
        let response = self.transport.get(&path, &[]).await?;
        extract_object(response, "submolt")
    }

    /// Create a new submolt.
    pub async fn create(&self, request: CreateSubmoltRequest) -> Result<Submolt> {
        let response = self
            .transport
            .post("submolts", Some(to_body(&request)?))
            .await?;
        extract_object(response, "submolt")
    }

    /// Subscribe to a submolt.
    pub async fn subscribe(&self, name: &str) -> Result<ActionAck> {
        let path = format!("submolts/{}/subscribe", path_segment(name));
        let response = self.transport.post(&path, None).await?;
        extract_ack(response)
    }

    /// Unsubscribe from a submolt.
    pub async fn unsubscribe(&self, name: &str) -> Result<ActionAck> {
        let path = format!("submolts/{}/subscribe", path_segment(name));
        let response = self.transport.delete(&path).await?;
        extract_ack(response)
    }

    /// Feed of a single submolt.
    pub async fn feed(
        &self,
        name: &str,
        sort: PostSort,
        limit: Option<u32>,
    ) -> Result<Vec<Post>> {
        let mut query: Vec<(&str, String)> = vec![("sort", sort.as_str().to_string())];
        if let Some(n) = limit {
            query.push(("limit", n.to_string()));
        }
        let path = format!("submolts/{}/feed", path_segment(name));
        let response = self.transport.get(&path, &query).await?;
        extract_list(response, POST_LIST_KEYS)
    }
}
