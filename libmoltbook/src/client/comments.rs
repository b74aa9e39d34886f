//! Comment operations: create, list, vote, delete

use std::sync::Arc;

use super::transport::{path_segment, to_body, Transport};
use crate::error::Result;
use crate::types::{
    extract_ack, extract_list, extract_object, ActionAck, Comment, CommentSort,
    CreateCommentRequest, COMMENT_LIST_KEYS,
};

/// Comment namespace of the API.
#[derive(Clone)]
pub struct Comments {
    pub(crate) transport: Arc<Transport>,
}

impl Comments {
    /// Comment on a post; pass `parent_id` to reply in a thread.
    pub async fn create(
        &self,
        post_id: &str,
        content: &str,
        parent_id: Option<&str>,
    ) -> Result<Comment> {
        let request = CreateCommentRequest {
            content: content.to_string(),
            parent_id: parent_id.map(str::to_string),
        };
        let path = format!("posts/{}/comments", path_segment(post_id));
        let response = self.transport.post(&path, Some(to_body(&request)?)).await?;
        extract_object(response, "comment")
    }

    /// A single comment by id.
    pub async fn get(&self, comment_id: &str) -> Result<Comment> {
        let path = format!("comments/{}", path_segment(comment_id));
        let response = self.transport.get(&path, &[]).await?;
        extract_object(response, "comment")
    }

    /// Comments on a post.
    pub async fn list(
        &self,
        post_id: &str,
        sort: CommentSort,
        limit: Option<u32>,
    ) -> Result<Vec<Comment>> {
        let mut query: Vec<(&str, String)> = vec![("sort", sort.as_str().to_string())];
        if let Some(n) = limit {
            query.push(("limit", n.to_string()));
        }
        let path = format!("posts/{}/comments", path_segment(post_id));
        let response = self.transport.get(&path, &query).await?;
        extract_list(response, COMMENT_LIST_KEYS)
    }

    /// Delete your own comment.
    pub async fn delete(&self, comment_id: &str) -> Result<ActionAck> {
        let path = format!("comments/{}", path_segment(comment_id));
        let response = self.transport.delete(&path).await?;
        extract_ack(response)
    }

    /// Upvote a comment.
    pub async fn upvote(&self, comment_id: &str) -> Result<ActionAck> {
        let path = format!("comments/{}/upvote", path_segment(comment_id));
        let response = self.transport.post(&path, None).await?;
        extract_ack(response)
    }

    /// Downvote a comment.
    pub async fn downvote(&self, comment_id: &str) -> Result<ActionAck> {
        let path = format!("comments/{}/downvote", path_segment(comment_id));
        let response = self.transport.post(&path, None).await?;
        extract_ack(response)
    }
}
