use std::net::{IpAddr, SocketAddr};

use axum::Router;
use o5_core_contact_contracts::ContactFeatureService;
use o5_di::Build;
use tokio::net::TcpListener;
use tracing::info;

mod errors;
mod extractors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact> {
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Request header to take the client address from, e.g.
    /// `x-forwarded-for`. Only the first comma separated entry is used.
    pub real_ip_header: Option<String>,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactFeatureService,
{
    pub fn new(contact: Contact, config: RestServerConfig) -> Self {
        Self { contact, config }
    }

    /// Bind a listener on the configured address and serve requests until the
    /// process is terminated.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = SocketAddr::new(self.config.host, self.config.port);
        let listener = TcpListener::bind(addr).await?;
        info!("listening on {}", listener.local_addr()?);

        axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(Into::into)
    }

    /// The complete request handler, including all middlewares.
    ///
    /// Hosting platforms which manage the listener themselves invoke this
    /// router directly instead of calling [`RestServer::serve`].
    pub fn router(self) -> Router<()> {
        let router = Router::new().merge(routes::contact::router(self.contact.into()));

        // Layers added later run first: the request id and client ip must be
        // known when the trace span is created.
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::client_ip::add(self.config.real_ip_header.map(Into::into))(router);
        middlewares::request_id::add(router)
    }
}
