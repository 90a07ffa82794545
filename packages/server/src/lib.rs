#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the quake map dashboard.
//!
//! Serves the latest rendered dashboard as JSON and lets clients trigger a
//! refresh. A refresh runs once at startup; after that only
//! `POST /api/refresh` starts one.

mod handlers;
pub mod snapshot;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use quake_map_dashboard::{Dashboard, DashboardConfig};
use quake_map_source::{fault_lines::GeoJsonFaultSource, usgs::UsgsEventSource};

use crate::snapshot::SnapshotRenderer;

/// Dashboard wired to the remote sources and the snapshot renderer.
pub type ServerDashboard = Dashboard<UsgsEventSource, GeoJsonFaultSource, SnapshotRenderer>;

/// Shared application state.
pub struct AppState {
    /// The dashboard served by every handler.
    pub dashboard: ServerDashboard,
}

/// Registers the `/api` routes.
///
/// Each path is a resource, so a known path with the wrong method answers
/// 405 rather than 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::resource("/health").route(web::get().to(handlers::health)))
            .service(web::resource("/dashboard").route(web::get().to(handlers::dashboard)))
            .service(web::resource("/refresh").route(web::post().to(handlers::refresh)))
            .service(web::resource("/map").route(web::get().to(handlers::map))),
    );
}

/// Starts the quake map API server.
///
/// Builds the dashboard from `config`, kicks off the first refresh in the
/// background, and serves until shut down. The caller provides the
/// runtime (e.g. via `#[actix_web::main]`) and initialises logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP client cannot be built,
/// or the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: DashboardConfig) -> std::io::Result<()> {
    let dashboard =
        Dashboard::connect(config, SnapshotRenderer::default()).map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState { dashboard });

    let initial = state.clone();
    actix_web::rt::spawn(async move {
        match initial.dashboard.refresh_now().await {
            Ok(report) => log::info!("Initial refresh finished: {:?}", report.state),
            Err(e) => log::warn!("Initial refresh skipped: {e}"),
        }
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use quake_map_dashboard::RefreshState;

    use super::*;

    fn app_state() -> web::Data<AppState> {
        let dashboard = Dashboard::connect(DashboardConfig::embedded(), SnapshotRenderer::default())
            .unwrap();
        web::Data::new(AppState { dashboard })
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app =
            test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn map_returns_configured_view() {
        let app =
            test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/map").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["centerLat"], 21.9);
        assert_eq!(body["centerLon"], 96.0);
        assert_eq!(body["zoom"], 6);
        assert_eq!(body["bbox"]["maxLat"], 28.5);
        assert_eq!(body["faultStyle"]["color"], "#f59e0b");
        assert_eq!(body["chartTitles"]["daily"], "Daily Seismicity Trend");
        assert!(
            body["basemap"]["url"]
                .as_str()
                .is_some_and(|url| url.contains("basemaps.cartocdn.com/dark_all"))
        );
    }

    #[actix_web::test]
    async fn dashboard_starts_idle() {
        let app =
            test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/dashboard").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body["state"],
            serde_json::to_value(RefreshState::Idle).unwrap()
        );
        assert_eq!(body["loading"], false);
        assert!(body["feedStatus"].is_null());
        assert_eq!(body["markers"].as_array().map(Vec::len), Some(0));
    }

    #[actix_web::test]
    async fn refresh_rejects_get() {
        let app =
            test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/refresh").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[actix_web::test]
    async fn read_only_routes_reject_post() {
        let app =
            test::init_service(App::new().app_data(app_state()).configure(configure)).await;

        for uri in ["/api/health", "/api/dashboard", "/api/map"] {
            let req = test::TestRequest::post().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        }
    }

    #[actix_web::test]
    async fn unknown_route_is_not_found() {
        let app =
            test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/quakes").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
