use anyhow::{Error, Result};
use tracing::{debug, info};

use crate::{
    clients::slack::SlackClient,
    models::{
        envelope::{SnsEnvelope, SnsNotification},
        request::ViewerRequest,
        slack::{Severity, SlackPayload},
    },
};

// Checks run in order against the uri as already rewritten, so a trailing-slash
// path gains the default document first and never matches the bare page suffixes.
pub fn rewrite_viewer_request(mut request: ViewerRequest) -> ViewerRequest {
    if request.uri.ends_with('/') {
        request.uri.push_str("index.html");
    }

    for page in ["/terms", "/privacy", "/contact"] {
        if request.uri.ends_with(page) {
            request.uri.push_str("/index.html");
        }
    }

    debug!(uri = %request.uri, "Viewer request uri after rewrite");
    request
}

pub fn parse_delivery(payload: &str) -> Result<SnsNotification, Error> {
    info!("Raw delivery payload: {}", payload);
    let envelope = serde_json::from_str::<SnsEnvelope>(payload)?;
    envelope.into_first_notification()
}

pub async fn notify(
    notification: &SnsNotification,
    slack_client: &SlackClient,
) -> Result<Severity, Error> {
    info!(
        subject = %notification.subject,
        message_id = ?notification.message_id,
        topic_arn = ?notification.topic_arn,
        "Processing notification delivery"
    );

    let severity = Severity::classify(&notification.message);

    info!(
        message = %notification.message,
        severity = %severity,
        "Classified message severity"
    );

    let payload = SlackPayload::for_notification(notification);
    slack_client.post_message(&payload).await?;

    Ok(severity)
}
