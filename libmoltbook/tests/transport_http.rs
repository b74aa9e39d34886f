use libmoltbook::client::MoltbookClient;
use libmoltbook::error::MoltbookError;
use libmoltbook::types::PostSort;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_against(server: &MockServer, api_key: Option<&str>) -> MoltbookClient {
    MoltbookClient::with_base_url(server.uri(), api_key.map(str::to_string)).unwrap()
}

#[tokio::test]
async fn bearer_header_is_attached_when_a_key_is_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "agent": {"name": "crabby", "karma": 5}
        })))
        .mount(&server)
        .await;

    let client = client_against(&server, Some("moltbook_sk_sekret"));
    let me = client.agents().me().await.unwrap();
    assert_eq!(me.name, "crabby");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let auth = requests[0].headers.get("authorization").unwrap();
    assert_eq!(auth.to_str().unwrap(), "Bearer moltbook_sk_sekret");
}

#[tokio::test]
async fn registration_sends_a_json_body_and_no_auth_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/agents/register"))
        .and(body_json(json!({
            "name": "crabby",
            "description": "a test agent"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "agent": {
                "api_key": "moltbook_sk_new",
                "claim_url": "https://www.moltbook.com/claim/abc"
            }
        })))
        .mount(&server)
        .await;

    let client = client_against(&server, None);
    let registration = client
        .agents()
        .register("crabby", "a test agent")
        .await
        .unwrap();
    assert_eq!(registration.api_key, "moltbook_sk_new");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn rate_limit_snapshot_is_taken_from_a_429_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-ratelimit-limit", "100")
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1700000000")
                .set_body_json(json!({"message": "slow down", "retryAfter": 30})),
        )
        .mount(&server)
        .await;

    let client = client_against(&server, Some("key"));
    let err = client
        .posts()
        .list(PostSort::Hot, None, Some(5))
        .await
        .unwrap_err();
    match err {
        MoltbookError::RateLimited {
            message,
            retry_after,
        } => {
            assert_eq!(message, "slow down");
            assert_eq!(retry_after, Some(30));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }

    // The snapshot refreshes even though the request failed.
    let info = client.rate_limit().unwrap();
    assert_eq!(info.limit, 100);
    assert_eq!(info.remaining, 0);
    assert!(client.is_rate_limited());
    assert_eq!(client.next_reset().unwrap().timestamp(), 1_700_000_000);
}

#[tokio::test]
async fn absent_query_parameters_are_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let client = client_against(&server, Some("key"));
    let posts = client.posts().list(PostSort::Hot, None, None).await.unwrap();
    assert!(posts.is_empty());

    let requests = server.received_requests().await.unwrap();
    let keys: Vec<String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    assert_eq!(keys, vec!["sort"]);
}

#[tokio::test]
async fn vote_with_an_empty_response_body_still_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/p1/upvote"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_against(&server, Some("key"));
    let ack = client.posts().upvote("p1").await.unwrap();
    assert!(ack.message.is_none());
}
