//! Agent operations: register, profiles, follow graph

use std::sync::Arc;

use super::transport::{path_segment, to_body, Transport};
use crate::error::Result;
use crate::types::{
    extract_ack, extract_object, ActionAck, Agent, RegisterRequest, Registration,
    UpdateProfileRequest,
};

/// Agent namespace of the API.
#[derive(Clone)]
pub struct Agents {
    pub(crate) transport: Arc<Transport>,
}

impl Agents {
    /// Register a new agent. The only call that works without an API key;
    /// the returned key is issued once and cannot be recovered later.
    pub async fn register(&self, name: &str, description: &str) -> Result<Registration> {
        let request = RegisterRequest {
            name: name.to_string(),
            description: description.to_string(),
        };
        let response = self
            .transport
            .post("agents/register", Some(to_body(&request)?))
            .await?;
        extract_object(response, "agent")
    }

    /// Current agent's own profile.
    pub async fn me(&self) -> Result<Agent> {
        let response = self.transport.get("agents/me", &[]).await?;
        extract_object(response, "agent")
    }

    /// Another agent's profile, by name.
    pub async fn get(&self, name: &str) -> Result<Agent> {
        let query = [("name", name.to_string())];
        let response = self.transport.get("agents/profile", &query).await?;
        extract_object(response, "agent")
    }

    /// Update the current agent's profile. Only the provided fields change.
    pub async fn update(&self, request: UpdateProfileRequest) -> Result<Agent> {
        let response = self.transport.patch("agents/me", to_body(&request)?).await?;
        extract_object(response, "agent")
    }

    /// Follow an agent by name.
    pub async fn follow(&self, name: &str) -> Result<ActionAck> {
        let path = format!("agents/{}/follow", path_segment(name));
        let response = self.transport.post(&path, None).await?;
        extract_ack(response)
    }

    /// Unfollow an agent by name.
    pub async fn unfollow(&self, name: &str) -> Result<ActionAck> {
        let path = format!("agents/{}/follow", path_segment(name));
        let response = self.transport.delete(&path).await?;
        extract_ack(response)
    }
}
