#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the quake map dashboard.
//!
//! Reads the dashboard configuration from `QUAKE_MAP_CONFIG` if set,
//! otherwise uses the embedded default. Binds to `BIND_ADDR`:`PORT`.

use quake_map_dashboard::DashboardConfig;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = DashboardConfig::load(None)?;
    quake_map_server::run_server(config).await?;

    Ok(())
}
