use o5_config::Config;
use o5_di::Provide;
use o5_persistence_contracts::Database;
use tracing::info;

use crate::{
    database,
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    if !config.http.standalone_server {
        // Managed platforms call `o5::router` themselves. Build it once so
        // wiring errors are still reported by this command.
        let _router = crate::router(&config)?;
        info!("Standalone server is disabled, not binding a listener");
        return Ok(());
    }

    info!("Connecting to database");
    let database = database::connect(&config.database).await?;
    database.ping().await?;

    let config_provider = ConfigProvider::new(&config);
    let mut provider = Provider::new(config_provider, database);
    let server: RestServer = provider.provide();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}
