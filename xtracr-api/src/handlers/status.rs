use actix_web::{web, HttpResponse, Result as ActixResult};
use shared_types::{BackendStatus, StatusResponse};

use super::AppState;
use crate::helpers::notifications::{CollectingSink, NotificationSink};

/// One-shot backend status check, run by the UI when it loads
pub async fn check_status(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let mut sink = CollectingSink::new();

    let status = match state.backend.check_status().await {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!("Backend status check failed: {}", e);
            sink.error(&e.user_message("checking API status"));
            BackendStatus::Error
        }
    };

    Ok(HttpResponse::Ok().json(StatusResponse {
        status,
        notifications: sink.drain(),
    }))
}

/// Salesperson names for the sold-to dropdown. Falls back to the configured
/// default salesperson when the backend cannot be reached.
pub async fn salesperson_values(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let values = match state.backend.salesperson_values().await {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!("Failed to load salesperson values: {}", e);
            vec![state.config.default_salesperson.clone()]
        }
    };

    Ok(HttpResponse::Ok().json(values))
}
