use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::{json, Value};
use twitter_rest::endpoints::MediaUpload;
use twitter_rest::{
    Client, Credentials, Error, OAuth, Options, RateLimitReset, ReqwestTransport, Token,
};

fn test_client(base_url: &str) -> Client<ReqwestTransport> {
    let oauth = OAuth::new(
        Credentials::new("consumer-key", "consumer-secret"),
        Token::new("token-key", "token-secret"),
        ReqwestTransport::new().unwrap(),
    )
    .with_api_url(base_url);
    Client::new(Options::with_api_url(base_url), oauth)
}

fn media_snapshot(remaining: u32) -> Value {
    json!({
        "resources": {
            "media": {
                "/media/upload": {"limit": 15, "remaining": remaining, "reset": 1403602426}
            }
        }
    })
}

#[tokio::test]
async fn upload_sends_base64_payload() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let status = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/application/rate_limit_status.json")
                .query_param("resources", "media");
            then.status(200).json_body(media_snapshot(15));
        })
        .await;
    let upload = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/media/upload.json")
                .body_contains("media_data=");
            then.status(200)
                .json_body(json!({"media_id": 710511363345354753u64}));
        })
        .await;

    let client = test_client(&server.base_url());
    let result = client
        .media()
        .upload(&MediaUpload::from_bytes(b"koala"))
        .await?;

    status.assert_async().await;
    upload.assert_async().await;
    assert_eq!(result["media_id"], json!(710511363345354753u64));
    Ok(())
}

#[tokio::test]
async fn media_header_quota_fails_even_on_http_success() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/application/rate_limit_status.json");
            then.status(200).json_body(media_snapshot(15));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/media/upload.json");
            then.status(200)
                .header("x-mediaratelimit-remaining", "0")
                .header("x-mediaratelimit-reset", "500")
                .json_body(json!({"media_id": 1}));
        })
        .await;

    let client = test_client(&server.base_url());
    let err = client
        .media()
        .upload(&MediaUpload::from_bytes(b"koala"))
        .await
        .unwrap_err();

    assert_eq!(err.rate_limit_reset(), Some(RateLimitReset::In(500)));
    Ok(())
}

#[tokio::test]
async fn empty_payload_is_rejected_before_the_gate() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let status = server
        .mock_async(|when, then| {
            when.method(GET).path("/application/rate_limit_status.json");
            then.status(200).json_body(media_snapshot(15));
        })
        .await;

    let client = test_client(&server.base_url());
    let err = client
        .media()
        .upload(&MediaUpload::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(status.hits_async().await, 0);
    Ok(())
}

#[tokio::test]
async fn two_sources_are_rejected_before_the_gate() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let status = server
        .mock_async(|when, then| {
            when.method(GET).path("/application/rate_limit_status.json");
            then.status(200).json_body(media_snapshot(15));
        })
        .await;

    let upload = MediaUpload {
        media: Some("raw-bytes".to_string()),
        media_data: Some("cmF3LWJ5dGVz".to_string()),
        additional_owners: None,
    };
    let client = test_client(&server.base_url());
    let err = client.media().upload(&upload).await.unwrap_err();

    assert!(matches!(err, Error::InvalidArgument(_)));
    assert_eq!(status.hits_async().await, 0);
    Ok(())
}

#[tokio::test]
async fn exhausted_upload_bucket_blocks_the_post() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/application/rate_limit_status.json");
            then.status(200).json_body(media_snapshot(0));
        })
        .await;
    let upload = server
        .mock_async(|when, then| {
            when.method(POST).path("/media/upload.json");
            then.status(200).json_body(json!({"media_id": 1}));
        })
        .await;

    let client = test_client(&server.base_url());
    let err = client
        .media()
        .upload(&MediaUpload::from_bytes(b"koala"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RateLimited { .. }));
    assert_eq!(upload.hits_async().await, 0);
    Ok(())
}
