use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::{from_fn, Next},
    Router,
};
use tracing::debug;

pub fn add<S: Clone + Send + Sync + 'static>(
    real_ip_header: Option<Arc<str>>,
) -> impl FnOnce(Router<S>) -> Router<S> {
    |router| {
        router.layer(from_fn(move |mut request: Request, next: Next| {
            let client_ip = ClientIp::from_request(&request, real_ip_header.as_deref());
            request.extensions_mut().insert(client_ip);
            next.run(request)
        }))
    }
}

/// Best effort address of the client which sent the request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ClientIp(pub Option<String>);

impl ClientIp {
    fn from_request(request: &Request, real_ip_header: Option<&str>) -> Self {
        let remote_addr = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let forwarded = real_ip_header.and_then(|header| forwarded_ip(request.headers(), header));
        if let (Some(forwarded), Some(remote_addr)) = (&forwarded, &remote_addr) {
            debug!(%forwarded, %remote_addr, "using forwarded client ip");
        }

        Self(forwarded.or(remote_addr))
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// First entry of a comma separated forwarding header such as
/// `X-Forwarded-For: client, proxy1, proxy2`.
fn forwarded_ip(headers: &HeaderMap, header: &str) -> Option<String> {
    let value = headers.get(header)?;
    let first = String::from_utf8_lossy(value.as_bytes())
        .split(',')
        .next()?
        .trim()
        .to_owned();
    (!first.is_empty()).then_some(first)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn first_forwarded_entry() {
        assert_eq!(
            forwarded_ip(&headers("203.0.113.7, 10.0.0.1, 10.0.0.2"), "x-forwarded-for")
                .as_deref(),
            Some("203.0.113.7")
        );
        assert_eq!(
            forwarded_ip(&headers("  198.51.100.1  "), "X-Forwarded-For").as_deref(),
            Some("198.51.100.1")
        );
        assert_eq!(
            forwarded_ip(&headers("2001:db8::1,10.0.0.1"), "x-forwarded-for").as_deref(),
            Some("2001:db8::1")
        );
    }

    #[test]
    fn empty_forwarded_entry() {
        assert_eq!(forwarded_ip(&headers(""), "x-forwarded-for"), None);
        assert_eq!(forwarded_ip(&headers(" , 10.0.0.1"), "x-forwarded-for"), None);
        assert_eq!(forwarded_ip(&HeaderMap::new(), "x-forwarded-for"), None);
    }
}
