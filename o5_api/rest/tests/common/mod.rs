use std::{
    io,
    net::{IpAddr, Ipv4Addr},
    sync::{Arc, Mutex},
};

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use o5_api_rest::{RestServer, RestServerConfig};
use o5_core_contact_contracts::ContactFeatureService;
use o5_models::contact::{ContactForm, ContactMessageCreated, ContactMessageId, ContactSubmission};
use serde_json::Value;
use tower::ServiceExt;

pub fn router(service: impl ContactFeatureService) -> Router {
    RestServer::new(
        service,
        RestServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            real_ip_header: Some("x-forwarded-for".into()),
        },
    )
    .router()
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&body).unwrap();
    (status, headers, body)
}

pub fn post_json(path: &str, body: &Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .header("user-agent", "Mozilla/5.0")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn valid_body() -> Value {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "4165551234",
        "subject": "Hello there",
        "message": "This is a test message.",
    })
}

pub fn submission(ip: Option<&str>) -> ContactSubmission {
    ContactSubmission::from_form(
        &ContactForm {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: "4165551234".into(),
            subject: "Hello there".into(),
            message: "This is a test message.".into(),
        },
        ip.map(Into::into),
        Some("Mozilla/5.0".into()),
    )
    .unwrap()
}

pub fn created(id: i64) -> ContactMessageCreated {
    ContactMessageCreated {
        id: ContactMessageId::from(id),
        created_at: Utc.with_ymd_and_hms(2024, 5, 17, 12, 30, 0).unwrap(),
    }
}

/// Log output captured by a thread local subscriber.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Capture all events emitted on the current thread until the returned
    /// guard is dropped.
    pub fn start() -> (Self, tracing::subscriber::DefaultGuard) {
        let logs = Self::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
