use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

use crate::models::envelope::SnsNotification;

pub const WEBHOOK_USERNAME: &str = "Deep Seas Ops";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Danger,
    Warning,
    Good,
}

impl Severity {
    // Prefix matching is case-sensitive and anchored at the start of the message.
    pub fn classify(message: &str) -> Self {
        if message.starts_with("ERROR") {
            Severity::Danger
        } else if message.starts_with("WARNING") {
            Severity::Warning
        } else {
            Severity::Good
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Severity::Danger => write!(f, "danger"),
            Severity::Warning => write!(f, "warning"),
            Severity::Good => write!(f, "good"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackPayload {
    pub username: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub color: Severity,
    pub text: String,
}

impl SlackPayload {
    pub fn for_notification(notification: &SnsNotification) -> Self {
        Self {
            username: WEBHOOK_USERNAME.to_string(),
            text: format!("*{}*", notification.subject),
            attachments: vec![Attachment {
                color: Severity::classify(&notification.message),
                text: notification.message.clone(),
            }],
        }
    }
}
