//! HR console entry-point: loads settings, seeds the stores and serves the API.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hr_console::inbound::http::health::HealthState;
use hr_console::inbound::http::session_config::{BuildMode, session_settings};
use hr_console::outbound::memory::ConsoleStores;
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| io::Error::other(format!("load server settings: {err}")))?;
    let session = session_settings(&settings.session_toggles(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let stores = ConsoleStores::with_account_employees(settings.store_latency())
        .map_err(|err| io::Error::other(err.to_string()))?;
    seed_example_data(&stores)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(session, bind_addr, stores),
    )?;
    info!(%bind_addr, "hr console listening");
    server.await
}

#[cfg(feature = "example-data")]
fn seed_example_data(stores: &ConsoleStores) -> io::Result<()> {
    use hr_console::example_data::{ExampleDataSettings, seed_example_data_on_startup};

    let settings = ExampleDataSettings::load()
        .map_err(|err| io::Error::other(format!("load example data settings: {err}")))?;
    seed_example_data_on_startup(&settings, stores).map_err(io::Error::other)?;
    Ok(())
}

#[cfg(not(feature = "example-data"))]
#[expect(
    clippy::unnecessary_wraps,
    reason = "keeps one call site for both feature configurations"
)]
fn seed_example_data(_stores: &ConsoleStores) -> io::Result<()> {
    Ok(())
}
