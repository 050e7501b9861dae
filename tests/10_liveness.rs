mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn liveness_endpoint_responds() -> Result<()> {
    let server = common::TestServer::start().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/", server.base_url)).send().await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "EduCircle API is running");
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> Result<()> {
    let server = common::TestServer::start().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/no-such-route", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
