use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    clients::{health::HealthChecker, slack::SlackClient},
    config::Config,
    models::{
        health::HealthStatus,
        request::ViewerRequest,
        response::ApiResponse,
        slack::Severity,
    },
    utils::{notify, parse_delivery, rewrite_viewer_request},
};

pub struct AppState {
    slack_client: SlackClient,
    health_checker: HealthChecker,
}

pub async fn run_api_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        slack_client: SlackClient::new(&config)?,
        health_checker: HealthChecker::new(),
    });

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/edge/viewer-request", post(viewer_request))
        .route("/events/sns", post(sns_delivery))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Function host started");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn viewer_request(Json(request): Json<ViewerRequest>) -> Json<ViewerRequest> {
    Json(rewrite_viewer_request(request))
}

async fn sns_delivery(State(state): State<Arc<AppState>>, body: String) -> impl IntoResponse {
    let notification = match parse_delivery(&body) {
        Ok(notification) => notification,
        Err(e) => {
            warn!(error = %e, "Rejected malformed delivery");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<Severity>::error(
                    e.to_string(),
                    "Malformed notification delivery".to_string(),
                )),
            );
        }
    };

    match notify(&notification, &state.slack_client).await {
        Ok(severity) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                severity,
                "Notification forwarded".to_string(),
            )),
        ),
        Err(e) => {
            warn!(error = %e, "Notification delivery failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::error(
                    e.to_string(),
                    "Webhook delivery failed".to_string(),
                )),
            )
        }
    }
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_checker.check_all().await;

    let status_code = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}
