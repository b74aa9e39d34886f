//! Data model for the Moltbook API
//!
//! The API has been observed returning two stylings of the same payloads
//! (snake_case and camelCase) and several envelope shapes around them.
//! Response structs tolerate both stylings via serde aliases; list payloads
//! go through [`extract_list`], an ordered probe over known wrapper keys.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MoltbookError, Result};

// ---------- Sorts ----------

/// Sort order for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    #[default]
    Hot,
    New,
    Top,
    Rising,
}

impl PostSort {
    pub fn as_str(self) -> &'static str {
        match self {
            PostSort::Hot => "hot",
            PostSort::New => "new",
            PostSort::Top => "top",
            PostSort::Rising => "rising",
        }
    }
}

impl std::str::FromStr for PostSort {
    type Err = MoltbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hot" => Ok(PostSort::Hot),
            "new" => Ok(PostSort::New),
            "top" => Ok(PostSort::Top),
            "rising" => Ok(PostSort::Rising),
            other => Err(MoltbookError::InvalidInput(format!(
                "invalid post sort '{other}' (expected hot, new, top, or rising)"
            ))),
        }
    }
}

/// Sort order for comment listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSort {
    #[default]
    Top,
    New,
    Controversial,
}

impl CommentSort {
    pub fn as_str(self) -> &'static str {
        match self {
            CommentSort::Top => "top",
            CommentSort::New => "new",
            CommentSort::Controversial => "controversial",
        }
    }
}

/// What a search should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    #[default]
    All,
    Posts,
    Comments,
}

impl SearchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::All => "all",
            SearchKind::Posts => "posts",
            SearchKind::Comments => "comments",
        }
    }
}

// ---------- Agents ----------

/// An agent profile.
#[derive(Debug, Clone, Deserialize)]
pub struct Agent {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub karma: Option<i64>,
    #[serde(default, alias = "followerCount")]
    pub follower_count: Option<u64>,
    #[serde(default, alias = "followingCount")]
    pub following_count: Option<u64>,
    #[serde(default, alias = "isClaimed")]
    pub is_claimed: Option<bool>,
    #[serde(default, alias = "avatarUrl")]
    pub avatar_url: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub stats: Option<AgentStats>,
}

/// Post/comment/subscription counts nested under an agent profile.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentStats {
    #[serde(default)]
    pub posts: Option<u64>,
    #[serde(default)]
    pub comments: Option<u64>,
    #[serde(default)]
    pub subscriptions: Option<u64>,
}

/// Request body for agent registration (the only unauthenticated call).
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub description: String,
}

/// Registration result. The API key is issued exactly once here and cannot
/// be recovered later; persist it immediately.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    #[serde(alias = "apiKey")]
    pub api_key: String,
    #[serde(default, alias = "claimUrl")]
    pub claim_url: Option<String>,
    #[serde(default, alias = "verificationCode")]
    pub verification_code: Option<String>,
}

/// Request body for PATCH /agents/me. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ---------- Posts ----------

/// A post in a submolt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub submolt: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub upvotes: Option<i64>,
    #[serde(default)]
    pub downvotes: Option<i64>,
    #[serde(default, alias = "commentCount")]
    pub comment_count: Option<u64>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

impl Post {
    /// Best-effort score: `score` when present, otherwise upvotes minus
    /// downvotes, otherwise 0.
    pub fn effective_score(&self) -> i64 {
        self.score
            .or_else(|| match (self.upvotes, self.downvotes) {
                (None, None) => None,
                (up, down) => Some(up.unwrap_or(0) - down.unwrap_or(0)),
            })
            .unwrap_or(0)
    }

    /// One-line summary shared by the CLI tools:
    /// `[score] title  (m/submolt, N comments) id`.
    pub fn summary_line(&self) -> String {
        format!(
            "[{:>4}] {}  (m/{}, {} comments) {}",
            self.effective_score(),
            self.title.as_deref().unwrap_or("(untitled)"),
            self.submolt.as_deref().unwrap_or("?"),
            self.comment_count.unwrap_or(0),
            self.id,
        )
    }
}

/// Post or comment author reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, alias = "avatarUrl")]
    pub avatar_url: Option<String>,
}

/// Request body for creating a post.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePostRequest {
    pub submolt: String,
    pub title: String,
    pub content: String,
    /// Optional link URL for link posts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ---------- Comments ----------

/// A comment on a post, optionally threaded under a parent comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default, alias = "postId")]
    pub post_id: Option<String>,
    #[serde(default, alias = "parentId")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

/// Request body for adding a comment or a threaded reply.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

// ---------- Submolts ----------

/// A community channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submolt {
    pub name: String,
    #[serde(default, alias = "displayName")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "subscriberCount")]
    pub subscriber_count: Option<u64>,
    #[serde(default, alias = "isSubscribed")]
    pub is_subscribed: Option<bool>,
}

/// Request body for creating a submolt.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSubmoltRequest {
    pub name: String,
    pub display_name: String,
    pub description: String,
}

// ---------- Action acknowledgements ----------

/// Minimal acknowledgement returned by vote, follow, and subscribe calls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionAck {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Parses an acknowledgement body. Some of these endpoints answer with an
/// empty body; that still counts as success.
pub(crate) fn extract_ack(body: Value) -> Result<ActionAck> {
    if body.is_null() {
        return Ok(ActionAck::default());
    }
    serde_json::from_value(body)
        .map_err(|e| MoltbookError::Network(format!("error decoding response body: {e}")))
}

// ---------- Search ----------

/// Combined search results. The API has answered with `posts`/`comments`
/// arrays and with a mixed `results` array; both are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.comments.is_empty() && self.results.is_empty()
    }
}

/// One entry of a mixed `results` search payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Parses a search response leniently: unwraps a `data` envelope and treats
/// any non-object body as an empty result set.
pub(crate) fn extract_search(body: Value) -> Result<SearchResults> {
    let inner = unwrap_envelope(body, "data");
    if !inner.is_object() {
        return Ok(SearchResults::default());
    }
    serde_json::from_value(inner)
        .map_err(|e| MoltbookError::Network(format!("error decoding search response: {e}")))
}

// ---------- Rate limiting ----------

/// Per-response rate-limit snapshot derived from `x-ratelimit-*` headers.
/// Advisory telemetry only; never used for admission control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: u64,
    pub remaining: u64,
    /// Reset time as epoch seconds, straight from the header.
    pub reset_epoch: i64,
}

impl RateLimitInfo {
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Option<Self> {
        let read = |name: &str| -> Option<i64> {
            headers.get(name)?.to_str().ok()?.trim().parse().ok()
        };
        Some(Self {
            limit: read("x-ratelimit-limit")?.max(0) as u64,
            remaining: read("x-ratelimit-remaining")?.max(0) as u64,
            reset_epoch: read("x-ratelimit-reset")?,
        })
    }

    /// The reset moment as a timestamp.
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.reset_epoch, 0).single()
    }
}

// ---------- Envelope handling ----------

/// Wrapper keys probed for post lists, in priority order.
pub(crate) const POST_LIST_KEYS: &[&str] = &["data", "posts"];
/// Wrapper keys probed for comment lists, in priority order.
pub(crate) const COMMENT_LIST_KEYS: &[&str] = &["data", "comments"];
/// Wrapper keys probed for submolt lists, in priority order.
pub(crate) const SUBMOLT_LIST_KEYS: &[&str] = &["data", "submolts"];

/// Extracts a list payload from a response body.
///
/// Accepts a raw JSON array, or an object wrapping the array under one of
/// `keys`; keys are probed in order and the first present one wins. An
/// object matching none of the keys yields an empty list rather than an
/// error; callers treat an unrecognized wrapper as an empty feed.
pub(crate) fn extract_list<T: DeserializeOwned>(body: Value, keys: &[&str]) -> Result<Vec<T>> {
    let list = match body {
        Value::Array(_) => body,
        Value::Object(mut map) => {
            match keys.iter().find_map(|k| map.remove(*k)) {
                Some(found) => found,
                None => return Ok(Vec::new()),
            }
        }
        _ => return Ok(Vec::new()),
    };
    serde_json::from_value(list)
        .map_err(|e| MoltbookError::Network(format!("error decoding list response: {e}")))
}

/// Unwraps a `{key: {...}}` envelope, passing bare objects through as-is.
pub(crate) fn unwrap_envelope(body: Value, key: &str) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key(key) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Deserializes a single-object response after unwrapping its envelope.
/// Probes `data` first, then the resource-specific key.
pub(crate) fn extract_object<T: DeserializeOwned>(body: Value, key: &str) -> Result<T> {
    let inner = unwrap_envelope(unwrap_envelope(body, "data"), key);
    serde_json::from_value(inner)
        .map_err(|e| MoltbookError::Network(format!("error decoding {key} response: {e}")))
}
