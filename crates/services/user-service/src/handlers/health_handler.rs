//! Liveness probe backed by a database round trip.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub service: String,
    pub status: HealthStatus,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    /// Build the report from the outcome of a `SELECT 1` ping.
    pub fn from_ping(service: &str, ping: Result<(), DbErr>) -> Self {
        let database = match ping {
            Ok(()) => DatabaseHealth {
                status: HealthStatus::Healthy,
                error: None,
            },
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                DatabaseHealth {
                    status: HealthStatus::Unhealthy,
                    error: Some(e.to_string()),
                }
            }
        };

        Self {
            service: service.to_string(),
            status: database.status,
            database,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// 200 when the database answers, 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let report = HealthReport::from_ping(
        &state.config.service.service_name,
        state.database.ping().await,
    );

    (report.status_code(), Json(report)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_ping_is_healthy() {
        let report = HealthReport::from_ping("user-service", Ok(()));

        assert_eq!(report.status, HealthStatus::Healthy);
        assert_eq!(report.status_code(), StatusCode::OK);
        assert!(report.database.error.is_none());
    }

    #[test]
    fn failed_ping_is_unavailable_and_reports_cause() {
        let err = DbErr::Conn(sea_orm::RuntimeErr::Internal("refused".to_string()));
        let report = HealthReport::from_ping("user-service", Err(err));

        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert_eq!(report.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let body = serde_json::to_value(&report).unwrap();
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["database"]["status"], "unhealthy");
        assert!(body["database"]["error"].as_str().unwrap().contains("refused"));
    }
}
