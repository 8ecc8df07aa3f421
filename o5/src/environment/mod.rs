use std::sync::Arc;

use o5_api_rest::RestServerConfig;
use o5_client::ContactApiServiceConfig;
use o5_config::Config;
use o5_di::provider;
use types::Database;
use url::Url;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        database: Database,
        ..config: ConfigProvider {
            RestServerConfig,
            ContactApiServiceConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, database: Database) -> Self {
        Self {
            _cache: Default::default(),
            database,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        rest_server_config: RestServerConfig,
        contact_api_service_config: ContactApiServiceConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        let rest_server_config = RestServerConfig {
            host: config.http.host,
            port: config.http.port,
            real_ip_header: config.http.real_ip_header.clone(),
        };

        let contact_api_service_config = ContactApiServiceConfig {
            endpoint: Arc::new(config.client.endpoint.clone()),
        };

        Self {
            _cache: Default::default(),
            rest_server_config,
            contact_api_service_config,
        }
    }

    /// Send contact forms to `endpoint` instead of the configured one.
    pub fn with_client_endpoint(mut self, endpoint: Url) -> Self {
        self.contact_api_service_config = ContactApiServiceConfig {
            endpoint: Arc::new(endpoint),
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use o5_di::Provide;
    use types::{ContactApi, RestServer};

    use super::*;
    use crate::database;

    fn config() -> Config {
        o5_config::load_with_env(&[o5_config::DEFAULT_CONFIG_PATH], HashMap::new()).unwrap()
    }

    #[tokio::test]
    async fn provide_rest_server() {
        let config = config();
        let database = database::connect_lazy(&config.database).unwrap();

        let mut provider = Provider::new(ConfigProvider::new(&config), database);
        let _: RestServer = provider.provide();
    }

    #[test]
    fn provide_contact_api() {
        let mut provider = ConfigProvider::new(&config());
        let _: ContactApi = provider.provide();
    }
}
