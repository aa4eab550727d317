use mockito::{Matcher, Server};
use notedx_client::application::client::Client;
use notedx_client::application::config::Config;
use notedx_client::error::AppError;
use notedx_client::model::requests::CreateAccountRequest;
use notedx_client::model::retry::RetryConfig;
use reqwest::StatusCode;
use serde_json::{Value, json};

fn test_config(config: Config, retry: RetryConfig) -> Config {
    let mut config = config.retry(retry).auto_login(false);
    config.rate_limiter.max_requests = 0;
    config
}

fn api_key_client(base_url: &str, retry: RetryConfig) -> Client {
    Client::new_lazy(test_config(
        Config::with_api_key(base_url, "test-api-key"),
        retry,
    ))
    .unwrap()
}

async fn token_client(base_url: &str) -> Client {
    let config = Config::with_credentials(base_url, "test@example.com", "test-password");
    let client = Client::new_lazy(test_config(config, RetryConfig::no_retry())).unwrap();
    client.set_token("test-token", Some("test-refresh")).await;
    client
}

async fn error_for(status: usize, body: &str) -> AppError {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/test")
        .with_status(status)
        .with_body(body)
        .create_async()
        .await;
    let client = api_key_client(&server.url(), RetryConfig::no_retry());
    client.get::<Value>("test").await.unwrap_err()
}

#[tokio::test]
async fn test_error_status_mapping() {
    assert!(matches!(
        error_for(400, r#"{"detail":"Missing template"}"#).await,
        AppError::BadRequest(ref m) if m == "Missing template"
    ));
    assert!(matches!(
        error_for(401, r#"{"message":"bad key"}"#).await,
        AppError::Authentication(ref m) if m.starts_with("Invalid API key")
    ));
    assert!(matches!(
        error_for(402, r#"{"detail":"Free tier exhausted"}"#).await,
        AppError::PaymentRequired(_)
    ));
    assert!(matches!(
        error_for(403, r#"{"detail":"Forbidden"}"#).await,
        AppError::Authorization(_)
    ));
    assert!(matches!(
        error_for(
            403,
            r#"{"error":{"code":"ACCOUNT_INACTIVE","message":"Account is cancelled"}}"#
        )
        .await,
        AppError::InactiveAccount(_)
    ));
    assert!(matches!(
        error_for(404, r#"{"detail":"No such thing"}"#).await,
        AppError::NotFound(_)
    ));
    assert!(matches!(
        error_for(500, "boom").await,
        AppError::InternalServer(ref m) if m.contains("boom")
    ));
    assert!(matches!(
        error_for(503, "").await,
        AppError::ServiceUnavailable(_)
    ));
    assert!(matches!(
        error_for(418, "teapot").await,
        AppError::Api { status, .. } if status == StatusCode::IM_A_TEAPOT
    ));
}

#[tokio::test]
async fn test_transient_errors_are_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/test")
        .with_status(500)
        .with_body(r#"{"detail":"Internal error"}"#)
        .expect(3)
        .create_async()
        .await;

    let client = api_key_client(
        &server.url(),
        RetryConfig::with_max_retries_and_delay(2, 1),
    );
    let err = client.get::<Value>("test").await.unwrap_err();

    assert!(matches!(err, AppError::InternalServer(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transient_errors_then_success() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("GET", "/test")
        .with_status(500)
        .with_body(r#"{"detail":"Internal error"}"#)
        .expect(2)
        .create_async()
        .await;
    let ok = server
        .mock("GET", "/test")
        .with_status(200)
        .with_body(r#"{"status":"recovered"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = api_key_client(
        &server.url(),
        RetryConfig::with_max_retries_and_delay(3, 1),
    );
    let value: Value = client.get("test").await.unwrap();

    assert_eq!(value, json!({"status": "recovered"}));
    failing.assert_async().await;
    ok.assert_async().await;
}

#[tokio::test]
async fn test_connection_errors_are_retried_then_reported() {
    // Nothing listens on port 1
    let client = api_key_client(
        "http://127.0.0.1:1",
        RetryConfig::with_max_retries_and_delay(2, 1),
    );
    let start = std::time::Instant::now();
    let err = client.get::<Value>("test").await.unwrap_err();

    assert!(matches!(err, AppError::Network(ref m) if m.starts_with("Connection error")));
    // Two backoff sleeps happened before giving up
    assert!(start.elapsed() >= std::time::Duration::from_millis(2));
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/test")
        .with_status(400)
        .with_body(r#"{"detail":"Bad input"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = api_key_client(
        &server.url(),
        RetryConfig::with_max_retries_and_delay(3, 1),
    );
    let err = client.get::<Value>("test").await.unwrap_err();

    assert!(matches!(err, AppError::BadRequest(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/test")
        .with_status(429)
        .with_header("Retry-After", "30")
        .with_body(r#"{"detail":"Too many requests"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = api_key_client(&server.url(), RetryConfig::no_retry());
    let err = client.get::<Value>("test").await.unwrap_err();

    match err {
        AppError::RateLimitExceeded {
            message,
            retry_after,
        } => {
            assert_eq!(retry_after, Some(30));
            assert!(message.contains("Too many requests"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limit_waits_for_retry_after() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/test")
        .with_status(429)
        .with_header("Retry-After", "1")
        .expect(2)
        .create_async()
        .await;

    let client = api_key_client(
        &server.url(),
        RetryConfig::with_max_retries_and_delay(1, 1),
    );
    let started = std::time::Instant::now();
    let err = client.get::<Value>("test").await.unwrap_err();

    assert!(started.elapsed() >= std::time::Duration::from_secs(1));
    assert!(matches!(
        err,
        AppError::RateLimitExceeded {
            retry_after: Some(1),
            ..
        }
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_path_slash_handling() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/test")
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .expect(4)
        .create_async()
        .await;

    let base = format!("{}/", server.url());
    let client = api_key_client(&base, RetryConfig::no_retry());
    for path in ["/test", "test", "/test/", "test/"] {
        let body: Value = client.get(path).await.unwrap();
        assert_eq!(body, json!({"ok": true}));
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_key_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/test")
        .match_header("x-api-key", "test-api-key")
        .match_header("authorization", Matcher::Missing)
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = api_key_client(&server.url(), RetryConfig::no_retry());
    let _: Value = client.get("test").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_bearer_token_takes_precedence_over_api_key() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/test")
        .match_header("authorization", "Bearer test-token")
        .match_header("x-api-key", Matcher::Missing)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = api_key_client(&server.url(), RetryConfig::no_retry());
    client.set_token("test-token", None).await;
    let _: Value = client.get("test").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_parameters_are_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/test")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("a".into(), "1".into()),
            Matcher::UrlEncoded("b".into(), "two words".into()),
        ]))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = api_key_client(&server.url(), RetryConfig::no_retry());
    let query = vec![
        ("a".to_string(), "1".to_string()),
        ("b".to_string(), "two words".to_string()),
    ];
    let _: Value = client.get_with_query("test", &query).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_expired_token_is_refreshed_once() {
    let mut server = Server::new_async().await;
    let rejected = server
        .mock("GET", "/test")
        .match_header("authorization", "Bearer test-token")
        .with_status(401)
        .with_body(r#"{"detail":"Token expired"}"#)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .match_body(Matcher::Json(json!({"refresh_token": "test-refresh"})))
        .with_status(200)
        .with_body(r#"{"access_token":"new-token","expires_in":3600}"#)
        .expect(1)
        .create_async()
        .await;
    let accepted = server
        .mock("GET", "/test")
        .match_header("authorization", "Bearer new-token")
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .expect(1)
        .create_async()
        .await;

    let client = token_client(&server.url()).await;
    let body: Value = client.get("test").await.unwrap();
    assert_eq!(body, json!({"ok": true}));

    let session = client.auth().current_session().await.unwrap();
    assert_eq!(session.access_token, "new-token");
    assert_eq!(session.refresh_token.as_deref(), Some("test-refresh"));

    rejected.assert_async().await;
    refresh.assert_async().await;
    accepted.assert_async().await;
}

#[tokio::test]
async fn test_failed_refresh_falls_back_to_login() {
    let mut server = Server::new_async().await;
    let _rejected = server
        .mock("GET", "/test")
        .match_header("authorization", "Bearer test-token")
        .with_status(401)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .with_status(401)
        .with_body(r#"{"detail":"Refresh token revoked"}"#)
        .expect(1)
        .create_async()
        .await;
    let login = server
        .mock("POST", "/auth/login")
        .match_body(Matcher::Json(json!({
            "email": "test@example.com",
            "password": "test-password"
        })))
        .with_status(200)
        .with_body(r#"{"id_token":"relogin-token","refresh_token":"relogin-refresh"}"#)
        .expect(1)
        .create_async()
        .await;
    let accepted = server
        .mock("GET", "/test")
        .match_header("authorization", "Bearer relogin-token")
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let client = token_client(&server.url()).await;
    let _: Value = client.get("test").await.unwrap();

    let session = client.get_session().await.unwrap();
    assert_eq!(session.access_token, "relogin-token");
    assert_eq!(session.refresh_token.as_deref(), Some("relogin-refresh"));

    refresh.assert_async().await;
    login.assert_async().await;
    accepted.assert_async().await;
}

#[tokio::test]
async fn test_token_rejected_after_refresh() {
    let mut server = Server::new_async().await;
    let _rejected = server
        .mock("GET", "/test")
        .with_status(401)
        .with_body(r#"{"detail":"Unauthorized"}"#)
        .expect(2)
        .create_async()
        .await;
    let _refresh = server
        .mock("POST", "/auth/refresh")
        .with_status(200)
        .with_body(r#"{"access_token":"new-token"}"#)
        .create_async()
        .await;

    let client = token_client(&server.url()).await;
    let err = client.get::<Value>("test").await.unwrap_err();

    match err {
        AppError::Authentication(message) => {
            assert!(message.contains("token rejected after refresh"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_refresh_without_login_clears_session() {
    let mut server = Server::new_async().await;
    let _rejected = server
        .mock("GET", "/test")
        .match_header("authorization", "Bearer stale-token")
        .with_status(401)
        .create_async()
        .await;
    let _refresh = server
        .mock("POST", "/auth/refresh")
        .with_status(400)
        .with_body(r#"{"detail":"Invalid refresh token"}"#)
        .create_async()
        .await;
    let with_key = server
        .mock("GET", "/test")
        .match_header("x-api-key", "test-api-key")
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let client = api_key_client(&server.url(), RetryConfig::no_retry());
    client.set_token("stale-token", Some("stale-refresh")).await;

    let err = client.get::<Value>("test").await.unwrap_err();
    assert!(matches!(err, AppError::Authentication(ref m) if m.starts_with("Session expired")));
    assert!(!client.auth().has_token().await);

    let _: Value = client.get("test").await.unwrap();
    with_key.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_requests_share_one_refresh() {
    let mut server = Server::new_async().await;
    let _rejected = server
        .mock("GET", "/test")
        .match_header("authorization", "Bearer test-token")
        .with_status(401)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .with_status(200)
        .with_body(r#"{"access_token":"new-token","expires_in":3600}"#)
        .expect(1)
        .create_async()
        .await;
    let _accepted = server
        .mock("GET", "/test")
        .match_header("authorization", "Bearer new-token")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = token_client(&server.url()).await;
    let (a, b) = tokio::join!(client.get::<Value>("test"), client.get::<Value>("test"));
    assert!(a.is_ok());
    assert!(b.is_ok());
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_login_on_creation() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/auth/login")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({
            "email": "doctor@clinic.com",
            "password": "s3cret"
        })))
        .with_status(200)
        .with_body(
            r#"{"id_token":"abc","refresh_token":"def","expires_in":"1800","user_id":"user-1"}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let mut config = Config::with_credentials(&server.url(), "doctor@clinic.com", "s3cret")
        .retry(RetryConfig::no_retry());
    config.rate_limiter.max_requests = 0;
    let client = Client::new(config).await.unwrap();

    let session = client.auth().current_session().await.unwrap();
    assert_eq!(session.access_token, "abc");
    assert_eq!(session.refresh_token.as_deref(), Some("def"));
    assert_eq!(session.user_id.as_deref(), Some("user-1"));
    let remaining = session.seconds_until_expiry();
    assert!(remaining > 1700 && remaining <= 1800);
    login.assert_async().await;
}

#[tokio::test]
async fn test_login_failure_on_creation() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", "/auth/login")
        .with_status(401)
        .with_body(r#"{"detail":"Invalid credentials"}"#)
        .create_async()
        .await;

    let mut config = Config::with_credentials(&server.url(), "doctor@clinic.com", "wrong")
        .retry(RetryConfig::no_retry());
    config.rate_limiter.max_requests = 0;
    let err = Client::new(config).await.unwrap_err();

    match err {
        AppError::Authentication(message) => assert!(message.contains("Invalid credentials")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_deferred_login_on_first_request() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body(r#"{"access_token":"lazy-token"}"#)
        .expect(1)
        .create_async()
        .await;
    let request = server
        .mock("GET", "/test")
        .match_header("authorization", "Bearer lazy-token")
        .with_status(200)
        .with_body("{}")
        .expect(2)
        .create_async()
        .await;

    let config = Config::with_credentials(&server.url(), "doctor@clinic.com", "s3cret");
    let client = Client::new_lazy(test_config(config, RetryConfig::no_retry())).unwrap();
    assert!(!client.auth().has_token().await);

    let _: Value = client.get("test").await.unwrap();
    let _: Value = client.get("test").await.unwrap();

    login.assert_async().await;
    request.assert_async().await;
}

#[tokio::test]
async fn test_api_key_client_does_not_log_in() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", "/auth/login")
        .expect(0)
        .create_async()
        .await;

    let mut config = Config::with_api_key(&server.url(), "test-api-key");
    config.rate_limiter.max_requests = 0;
    let client = Client::new(config).await.unwrap();

    assert!(!client.auth().has_token().await);
    login.assert_async().await;
}

#[test]
fn test_client_requires_credentials() {
    let err = Client::new_lazy(Config::with_api_key("https://api.example.com", "")).unwrap_err();
    assert!(matches!(err, AppError::Authentication(_)));
}

#[tokio::test]
async fn test_create_account() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/create-account")
        .match_header("authorization", Matcher::Missing)
        .match_header("x-api-key", Matcher::Missing)
        .match_body(Matcher::Json(json!({
            "email": "new@clinic.com",
            "password": "s3cret!",
            "company_name": "New Clinic",
            "phone_number": "+1 555 0100"
        })))
        .with_status(200)
        .with_body(
            r#"{"user_id":"user-42","email":"new@clinic.com","message":"Account created successfully"}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let config = test_config(
        Config::with_api_key(&server.url(), "unused"),
        RetryConfig::no_retry(),
    );
    let request = CreateAccountRequest::new("new@clinic.com", "s3cret!", "New Clinic")
        .with_phone_number("+1 555 0100");
    let created = Client::create_account(&config, &request).await.unwrap();

    assert_eq!(created.user_id.as_deref(), Some("user-42"));
    assert_eq!(created.email.as_deref(), Some("new@clinic.com"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_account_validates_locally() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/create-account")
        .expect(0)
        .create_async()
        .await;

    let config = test_config(
        Config::with_api_key(&server.url(), "unused"),
        RetryConfig::no_retry(),
    );
    let request = CreateAccountRequest::new("not-an-email", "s3cret!", "New Clinic");
    let err = Client::create_account(&config, &request).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidField { ref field, .. } if field == "email"));
    mock.assert_async().await;
}
