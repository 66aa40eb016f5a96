use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::json;
use twitter_rest::{
    Client, Credentials, Method, OAuth, Options, Params, ReqwestTransport, Token,
};

fn test_oauth(base_url: &str) -> OAuth<ReqwestTransport> {
    OAuth::new(
        Credentials::new("consumer-key", "consumer-secret"),
        Token::new("token-key", "token-secret"),
        ReqwestTransport::new().unwrap(),
    )
    .with_api_url(base_url)
}

fn test_client(base_url: &str) -> Client<ReqwestTransport> {
    Client::new(Options::with_api_url(base_url), test_oauth(base_url))
}

#[tokio::test]
async fn redirect_marker_yields_the_location_header() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/account/banner.json");
            then.status(200)
                .header("location", "https://pbs.example.test/banner.png")
                .body("redirected");
        })
        .await;

    let client = test_client(&server.base_url());
    let payload = client
        .send_request("/account/banner.json", Method::Get, &Params::new(), None)
        .await?;

    assert_eq!(
        payload.into_redirect()?,
        "https://pbs.example.test/banner.png"
    );
    Ok(())
}

#[tokio::test]
async fn verify_credentials_true_on_200() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let valid = server
        .mock_async(|when, then| {
            when.method(GET).path("/account/verify_credentials.json");
            then.status(200).json_body(json!({"screen_name": "me"}));
        })
        .await;

    let oauth = test_oauth(&server.base_url());
    assert!(oauth.verify_credentials().await?);
    valid.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn verify_credentials_false_on_rejected_token() -> anyhow::Result<()> {
    // A rejected token does not raise: this endpoint tolerates non-200.
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/account/verify_credentials.json");
            then.status(401)
                .json_body(json!({"errors": [{"message": "Invalid or expired token", "code": 89}]}));
        })
        .await;

    let oauth = test_oauth(&server.base_url());
    assert!(!oauth.verify_credentials().await?);
    Ok(())
}

#[tokio::test]
async fn end_session_returns_the_null_cookie_body() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/account/end_session.json");
            then.status(200)
                .json_body(json!({"error": null, "request": "/1.1/account/end_session.json"}));
        })
        .await;

    let oauth = test_oauth(&server.base_url());
    let body = oauth.end_session().await?;

    mock.assert_async().await;
    assert_eq!(body["request"], json!("/1.1/account/end_session.json"));
    Ok(())
}

#[tokio::test]
async fn rate_limit_status_decodes_the_full_snapshot() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/application/rate_limit_status.json");
            then.status(200).json_body(json!({
                "rate_limit_context": {"access_token": "token-key"},
                "resources": {
                    "help": {
                        "/help/languages": {"limit": 15, "remaining": 15, "reset": 1403602426}
                    },
                    "blocks": {
                        "/blocks/ids": {"limit": 15, "remaining": 3, "reset": 1403602426}
                    }
                }
            }));
        })
        .await;

    let client = test_client(&server.base_url());
    let status = client.rate_limit_status(None).await?;

    assert_eq!(
        status.bucket("blocks", "/blocks/ids").map(|b| b.remaining),
        Some(3)
    );
    assert_eq!(
        status.bucket("help", "/help/languages").map(|b| b.limit),
        Some(Some(15))
    );
    Ok(())
}

#[tokio::test]
async fn help_languages_checks_its_bucket_then_fetches() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let status = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/application/rate_limit_status.json")
                .query_param("resources", "help");
            then.status(200).json_body(json!({
                "resources": {
                    "help": {
                        "/help/languages": {"limit": 15, "remaining": 15, "reset": 1403602426}
                    }
                }
            }));
        })
        .await;
    let languages = server
        .mock_async(|when, then| {
            when.method(GET).path("/help/languages.json");
            then.status(200)
                .json_body(json!([{"code": "en", "name": "English"}]));
        })
        .await;

    let client = test_client(&server.base_url());
    let result = client.help().languages().await?;

    status.assert_async().await;
    languages.assert_async().await;
    assert_eq!(result[0]["code"], json!("en"));
    Ok(())
}

#[tokio::test]
async fn block_create_is_gated_and_posts_the_user() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/application/rate_limit_status.json")
                .query_param("resources", "blocks");
            then.status(200).json_body(json!({
                "resources": {
                    "blocks": {
                        "/blocks/create": {"limit": 15, "remaining": 2, "reset": 1403602426}
                    }
                }
            }));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/blocks/create.json")
                .body("screen_name=annoying&skip_status=true");
            then.status(200)
                .json_body(json!({"screen_name": "annoying", "blocking": true}));
        })
        .await;

    let client = test_client(&server.base_url());
    let options = twitter_rest::endpoints::BlockOptions {
        include_entities: None,
        skip_status: Some(true),
    };
    let result = client
        .blocks()
        .create(twitter_rest::UserRef::from("annoying"), &options)
        .await?;

    create.assert_async().await;
    assert_eq!(result["blocking"], json!(true));
    Ok(())
}
