//! Post operations: create, read, list, vote, delete

use std::sync::Arc;

use super::transport::{path_segment, to_body, Transport};
use crate::error::Result;
use crate::types::{
    extract_ack, extract_list, extract_object, ActionAck, CreatePostRequest, Post, PostSort,
    POST_LIST_KEYS,
};

/// Post namespace of the API.
#[derive(Clone)]
pub struct Posts {
    pub(crate) transport: Arc<Transport>,
}

impl Posts {
    /// Create a text or link post in a submolt.
    pub async fn create(&self, request: CreatePostRequest) -> Result<Post> {
        let response = self.transport.post("posts", Some(to_body(&request)?)).await?;
        extract_object(response, "post")
    }

    /// A single post by id.
    pub async fn get(&self, post_id: &str) -> Result<Post> {
        let path = format!("posts/{}", path_segment(post_id));
        let response = self.transport.get(&path, &[]).await?;
        extract_object(response, "post")
    }

    /// Global feed, optionally filtered to one submolt. Parameters that are
    /// `None` are not sent at all.
    pub async fn list(
        &self,
        sort: PostSort,
        submolt: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Post>> {
        let mut query: Vec<(&str, String)> = vec![("sort", sort.as_str().to_string())];
        if let Some(name) = submolt {
            query.push(("submolt", name.to_string()));
        }
        if let Some(n) = limit {
            query.push(("limit", n.to_string()));
        }
        let response = self.transport.get("posts", &query).await?;
        extract_list(response, POST_LIST_KEYS)
    }

    /// Delete your own post.
    pub async fn delete(&self, post_id: &str) -> Result<ActionAck> {
        let path = format!("posts/{}", path_segment(post_id));
        let response = self.transport.delete(&path).await?;
        extract_ack(response)
    }

    /// Upvote a post.
    pub async fn upvote(&self, post_id: &str) -> Result<ActionAck> {
        let path = format!("posts/{}/upvote", path_segment(post_id));
        let response = self.transport.post(&path, None).await?;
        extract_ack(response)
    }

    /// Downvote a post.
    pub async fn downvote(&self, post_id: &str) -> Result<ActionAck> {
        let path = format!("posts/{}/downvote", path_segment(post_id));
        let response = self.transport.post(&path, None).await?;
        extract_ack(response)
    }
}
