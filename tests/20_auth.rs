// Authentication rejection paths. Every bearer-gated route must reject the
// request before any handler or store logic runs.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn protected_routes_reject_missing_token() -> Result<()> {
    let server = common::TestServer::start().await;
    let client = reqwest::Client::new();

    let attempts = [
        client.post(format!("{}/assignments", server.base_url)),
        client.put(format!("{}/assignments/00000000-0000-0000-0000-000000000000", server.base_url)),
        client.get(format!("{}/submissions", server.base_url)),
        client.post(format!("{}/submissions", server.base_url)),
        client.post(format!("{}/reviews", server.base_url)),
        client.get(format!("{}/bookmarks", server.base_url)),
        client.post(format!("{}/bookmarks", server.base_url)),
        client.delete(format!(
            "{}/bookmarks/00000000-0000-0000-0000-000000000000",
            server.base_url
        )),
    ];

    for attempt in attempts {
        let res = attempt.json(&json!({})).send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body: Value = res.json().await?;
        assert_eq!(body["error"], true);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    Ok(())
}

#[tokio::test]
async fn rejects_non_bearer_scheme() -> Result<()> {
    let server = common::TestServer::start().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/bookmarks", server.base_url))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn rejects_malformed_bearer_token() -> Result<()> {
    let server = common::TestServer::start().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/bookmarks", server.base_url))
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = res.json().await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn grading_route_rejects_malformed_id() -> Result<()> {
    let server = common::TestServer::start().await;
    let client = reqwest::Client::new();

    // PATCH /submissions/:id is public; a non-UUID id fails path extraction
    let res = client
        .patch(format!("{}/submissions/not-a-uuid", server.base_url))
        .json(&json!({
            "obtainedMarks": 50,
            "feedback": "nice",
            "markedBy": "peer@x.com"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
