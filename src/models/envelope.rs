use anyhow::{Error, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnsEnvelope {
    #[serde(rename = "Records")]
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsNotification,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnsNotification {
    #[serde(rename = "Subject")]
    pub subject: String,

    #[serde(rename = "Message")]
    pub message: String,

    #[serde(rename = "MessageId", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<Uuid>,

    #[serde(rename = "TopicArn", default, skip_serializing_if = "Option::is_none")]
    pub topic_arn: Option<String>,

    #[serde(rename = "Timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SnsEnvelope {
    // Only the first record is consulted; deliveries carry one record each.
    pub fn into_first_notification(self) -> Result<SnsNotification, Error> {
        self.records
            .into_iter()
            .next()
            .map(|record| record.sns)
            .ok_or_else(|| anyhow!("Delivery envelope contains no records"))
    }
}
