use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    clients::slack::SLACK_BASE_URL,
    models::health::{HealthCheckResponse, HealthStatus, ServiceHealth},
};

pub struct HealthChecker {
    webhook_base_url: String,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self::with_base_url(SLACK_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            webhook_base_url: base_url.to_string(),
        }
    }

    pub async fn check_all(&self) -> HealthCheckResponse {
        let mut checks = HashMap::new();

        let webhook_health = self.check_webhook_host().await;
        checks.insert("slack_webhook".to_string(), webhook_health);

        let overall_status = Self::determine_overall_status(&checks);

        HealthCheckResponse {
            status: overall_status,
            timestamp: Utc::now(),
            checks,
        }
    }

    async fn check_webhook_host(&self) -> ServiceHealth {
        let start = Instant::now();

        let client = match Client::builder().timeout(Duration::from_secs(5)).build() {
            Ok(client) => client,
            Err(e) => {
                return ServiceHealth::unhealthy(format!("Failed to create HTTP client: {}", e));
            }
        };

        // Any HTTP response means the host is reachable; the status code of an
        // unauthenticated probe is not meaningful.
        match client.get(&self.webhook_base_url).send().await {
            Ok(_) => {
                let elapsed = start.elapsed().as_millis() as u64;
                debug!(response_time_ms = elapsed, "Webhook host health check passed");
                ServiceHealth::healthy(elapsed)
            }
            Err(e) => {
                warn!(error = %e, "Webhook host unreachable");
                ServiceHealth::unhealthy(format!("Connection failed: {}", e))
            }
        }
    }

    fn determine_overall_status(checks: &HashMap<String, ServiceHealth>) -> HealthStatus {
        if checks
            .values()
            .any(|check| check.status == HealthStatus::Unhealthy)
        {
            HealthStatus::Unhealthy
        } else if checks
            .values()
            .any(|check| check.status == HealthStatus::Degraded)
        {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        }
    }
}
