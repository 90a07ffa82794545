//! HTTP handler functions for the quake map API.

use actix_web::{HttpResponse, web};
use quake_map_dashboard::DashboardError;
use quake_map_server_models::{ApiError, ApiHealth, ApiMapView, ApiRefreshResult};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/dashboard`
///
/// Returns everything rendered so far, tagged with the current refresh
/// state.
pub async fn dashboard(state: web::Data<AppState>) -> HttpResponse {
    let dashboard = &state.dashboard;
    HttpResponse::Ok().json(dashboard.renderer().snapshot(dashboard.state()))
}

/// `POST /api/refresh`
///
/// Runs a refresh to completion. Answers `409 Conflict` if one is already
/// running.
pub async fn refresh(state: web::Data<AppState>) -> HttpResponse {
    match state.dashboard.refresh_now().await {
        Ok(report) => HttpResponse::Ok().json(ApiRefreshResult::from(report)),
        Err(DashboardError::RefreshInProgress) => HttpResponse::Conflict().json(ApiError {
            error: DashboardError::RefreshInProgress.to_string(),
        }),
        Err(e) => {
            log::error!("Refresh failed: {e}");
            HttpResponse::InternalServerError().json(ApiError {
                error: "Refresh failed".to_string(),
            })
        }
    }
}

/// `GET /api/map`
///
/// Returns the initial map view, query region, and layer styles.
pub async fn map(state: web::Data<AppState>) -> HttpResponse {
    let config = state.dashboard.config();
    HttpResponse::Ok().json(ApiMapView::new(config.map, config.region))
}
