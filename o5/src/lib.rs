use axum::Router;
use o5_config::Config;
use o5_di::Provide;

use crate::environment::{types::RestServer, ConfigProvider, Provider};

pub mod commands;
pub mod database;
pub mod environment;

/// Build the complete http router for platforms which manage the listener
/// themselves.
///
/// The database pool is created without connecting, connections are
/// established by the first requests.
pub fn router(config: &Config) -> anyhow::Result<Router> {
    let database = database::connect_lazy(&config.database)?;
    let config_provider = ConfigProvider::new(config);
    let mut provider = Provider::new(config_provider, database);
    let server: RestServer = provider.provide();
    Ok(server.router())
}
