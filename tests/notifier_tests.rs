use anyhow::Result;
use deepseas_ops::{
    clients::slack::SlackClient,
    models::{envelope::SnsNotification, slack::Severity},
    utils::{notify, parse_delivery},
};
use serde_json::json;
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const WEBHOOK_PATH: &str = "/services/T00000000/B00000000/XXXXXXXXXXXXXXXXXXXXXXXX";

fn notification(subject: &str, message: &str) -> SnsNotification {
    SnsNotification {
        subject: subject.to_string(),
        message: message.to_string(),
        message_id: Some(Uuid::new_v4()),
        topic_arn: Some("arn:aws:sns:us-east-1:123456789012:ops-alerts".to_string()),
        timestamp: None,
    }
}

async fn mock_webhook(expected_requests: u64, status: u16) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string("ok"))
        .expect(expected_requests)
        .mount(&mock_server)
        .await;

    mock_server
}

/// Test: A delivery posts the complete payload to the configured webhook path
#[tokio::test]
async fn test_notify_posts_payload_to_webhook() -> Result<()> {
    let mock_server = mock_webhook(1, 200).await;
    let slack_client = SlackClient::with_base_url(&mock_server.uri(), WEBHOOK_PATH)?;

    let severity = notify(
        &notification("Deploy failed", "ERROR: deploy of site failed"),
        &slack_client,
    )
    .await?;

    assert_eq!(severity, Severity::Danger);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = requests[0].body_json()?;
    assert_eq!(body["username"], "Deep Seas Ops");
    assert_eq!(body["text"], "*Deploy failed*");
    assert_eq!(body["attachments"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["attachments"][0]["color"], "danger");
    assert_eq!(body["attachments"][0]["text"], "ERROR: deploy of site failed");

    Ok(())
}

/// Test: Warning and informational messages carry their own colors
#[tokio::test]
async fn test_notify_colors_follow_severity() -> Result<()> {
    let mock_server = mock_webhook(2, 200).await;
    let slack_client = SlackClient::with_base_url(&mock_server.uri(), WEBHOOK_PATH)?;

    let warning = notify(
        &notification("Disk usage", "WARNING: disk at 80%"),
        &slack_client,
    )
    .await?;
    let good = notify(
        &notification("Heartbeat", "All systems nominal"),
        &slack_client,
    )
    .await?;

    assert_eq!(warning, Severity::Warning);
    assert_eq!(good, Severity::Good);

    let requests = mock_server.received_requests().await.unwrap();
    let first: serde_json::Value = requests[0].body_json()?;
    let second: serde_json::Value = requests[1].body_json()?;

    assert_eq!(first["attachments"][0]["color"], "warning");
    assert_eq!(second["attachments"][0]["color"], "good");

    Ok(())
}

/// Test: A non-success webhook status fails the delivery after a single attempt
#[tokio::test]
async fn test_non_success_status_fails_without_retry() -> Result<()> {
    let mock_server = mock_webhook(1, 500).await;
    let slack_client = SlackClient::with_base_url(&mock_server.uri(), WEBHOOK_PATH)?;

    let result = notify(&notification("Outage", "ERROR: api down"), &slack_client).await;

    assert!(result.is_err(), "Non-success status should surface as error");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "Exactly one attempt should be made");

    Ok(())
}

/// Test: A connection-level failure is returned as an error, not a panic
#[tokio::test]
async fn test_connection_error_is_returned() -> Result<()> {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let slack_client = SlackClient::with_base_url(&uri, WEBHOOK_PATH)?;
    let result = notify(&notification("Outage", "ERROR: api down"), &slack_client).await;

    assert!(result.is_err(), "Connection failure should surface as error");

    Ok(())
}

/// Test: Concurrent deliveries are independent and each posts exactly once
#[tokio::test]
async fn test_concurrent_deliveries_are_independent() -> Result<()> {
    let mock_server = mock_webhook(3, 200).await;
    let slack_client = SlackClient::with_base_url(&mock_server.uri(), WEBHOOK_PATH)?;

    let deliveries = vec![
        notification("a", "ERROR: one"),
        notification("b", "WARNING: two"),
        notification("c", "three"),
    ];

    let results = futures_util::future::join_all(
        deliveries
            .iter()
            .map(|delivery| notify(delivery, &slack_client)),
    )
    .await;

    assert!(results.iter().all(Result::is_ok));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);

    Ok(())
}

/// Test: A parsed envelope flows end to end into a webhook post
#[tokio::test]
async fn test_delivery_end_to_end() -> Result<()> {
    let mock_server = mock_webhook(1, 200).await;
    let slack_client = SlackClient::with_base_url(&mock_server.uri(), WEBHOOK_PATH)?;

    let payload = json!({
        "Records": [
            {
                "Sns": {
                    "MessageId": Uuid::new_v4(),
                    "Subject": "Backup finished",
                    "Message": "Nightly backup completed in 4m12s"
                }
            }
        ]
    })
    .to_string();

    let delivery = parse_delivery(&payload)?;
    let severity = notify(&delivery, &slack_client).await?;

    assert_eq!(severity, Severity::Good);

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json()?;
    assert_eq!(body["text"], "*Backup finished*");
    assert_eq!(body["attachments"][0]["color"], "good");

    Ok(())
}

/// Test: Client construction rejects malformed webhook paths
#[test]
fn test_webhook_path_validation() {
    assert!(SlackClient::with_base_url("http://localhost", "").is_err());
    assert!(SlackClient::with_base_url("http://localhost", "services/T0/B0/X").is_err());
    assert!(SlackClient::with_base_url("http://localhost", "/services/T0/B0 /X").is_err());
    assert!(SlackClient::with_base_url("http://localhost", WEBHOOK_PATH).is_ok());
}
