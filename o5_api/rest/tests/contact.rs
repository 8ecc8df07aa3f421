use std::{
    future::IntoFuture,
    net::{Ipv4Addr, SocketAddr},
};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
};
use common::{created, post_json, router, send, submission, valid_body, CapturedLogs};
use o5_core_contact_contracts::{
    ContactFeatureService, ContactSubmitCommand, ContactSubmitError, MockContactFeatureService,
};
use o5_core_contact_impl::ContactFeatureServiceImpl;
use o5_models::contact::{ContactForm, ContactMessageRecord};
use o5_persistence_contracts::{contact::MockContactRepository, MockDatabase, MockTransaction};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::net::TcpListener;

mod common;

type ContactRepo = MockContactRepository<MockTransaction>;

#[tokio::test]
async fn saves_valid_submission() {
    // Arrange
    let service = ContactFeatureServiceImpl::new(
        MockDatabase::build(true),
        ContactRepo::new().with_create(submission(Some("203.0.113.7")), created(17)),
    );
    let mut request = post_json("/api/contact", &valid_body());
    request
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());

    // Act
    let (status, headers, body) = send(router(service), request).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "ok": true,
            "message": "Saved successfully",
            "id": 17,
            "createdAt": "2024-05-17T12:30:00Z",
        })
    );
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn passes_request_metadata() {
    // Arrange
    let service = MockContactFeatureService::new().with_submit(
        ContactSubmitCommand {
            form: ContactForm {
                name: "  Jane Doe ".into(),
                email: "jane@example.com".into(),
                phone: String::new(),
                subject: "Hello there".into(),
                message: "This is a test message.".into(),
            },
            ip: Some("2001:db8::1".into()),
            user_agent: Some("curl/8.5.0".into()),
        },
        Ok(ContactMessageRecord::new(created(5), submission(None))),
    );
    let request = Request::post("/api/contact")
        .header("content-type", "application/json")
        .header("user-agent", "curl/8.5.0")
        .header("x-forwarded-for", " 2001:db8::1 ,203.0.113.7")
        .body(Body::from(
            json!({
                "name": "  Jane Doe ",
                "email": "jane@example.com",
                "subject": "Hello there",
                "message": "This is a test message.",
            })
            .to_string(),
        ))
        .unwrap();

    // Act
    let (status, _, body) = send(router(service), request).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 5);
}

#[tokio::test]
async fn legacy_path() {
    // Arrange
    let service = ContactFeatureServiceImpl::new(
        MockDatabase::build(true),
        ContactRepo::new().with_create(submission(None), created(1)),
    );

    // Act
    let (status, _, body) = send(router(service), post_json("/api/contact.js", &valid_body())).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn remote_address_fallback() {
    // Arrange
    let service = ContactFeatureServiceImpl::new(
        MockDatabase::build(true),
        ContactRepo::new().with_create(submission(Some("192.0.2.10")), created(2)),
    );
    let mut request = post_json("/api/contact", &valid_body());
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 10], 54321))));

    // Act
    let (status, _, body) = send(router(service), request).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
}

#[tokio::test]
async fn remote_address_of_tcp_connection() {
    // Arrange
    let service = ContactFeatureServiceImpl::new(
        MockDatabase::build(true),
        ContactRepo::new().with_create(submission(Some("127.0.0.1")), created(9)),
    );
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::serve(
        listener,
        router(service).into_make_service_with_connect_info::<SocketAddr>(),
    );
    tokio::spawn(server.into_future());

    // Act
    let response = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
        .post(format!("http://{addr}/api/contact"))
        .header("user-agent", "Mozilla/5.0")
        .json(&valid_body())
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["id"], 9);
}

#[tokio::test]
async fn form_encoded_body() {
    // Arrange
    let service = ContactFeatureServiceImpl::new(
        MockDatabase::build(true),
        ContactRepo::new().with_create(submission(None), created(3)),
    );
    let request = Request::post("/api/contact")
        .header("content-type", "application/x-www-form-urlencoded")
        .header("user-agent", "Mozilla/5.0")
        .body(Body::from(
            "name=Jane+Doe&email=jane%40example.com&phone=4165551234&subject=Hello+there\
             &message=This+is+a+test+message.",
        ))
        .unwrap();

    // Act
    let (status, _, body) = send(router(service), request).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn invalid_email() {
    // Arrange
    let service = ContactFeatureServiceImpl::new(MockDatabase::untouched(), ContactRepo::new());
    let mut body = valid_body();
    body["email"] = json!("not-an-email");

    // Act
    let (status, _, body) = send(router(service), post_json("/api/contact", &body)).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "ok": false,
            "kind": "validation",
            "error": "Please correct the highlighted fields.",
            "fields": {"email": "Enter a valid email address."},
        })
    );
}

#[tokio::test]
async fn missing_and_null_fields() {
    // Arrange
    let service = ContactFeatureServiceImpl::new(MockDatabase::untouched(), ContactRepo::new());
    let body = json!({"name": null, "phone": null, "subject": "   "});

    // Act
    let (status, _, body) = send(router(service), post_json("/api/contact", &body)).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fields"],
        json!({
            "name": "Name is required.",
            "email": "Email is required.",
            "subject": "Subject is required.",
            "message": "Message is required.",
        })
    );
}

#[tokio::test]
async fn implausible_phone() {
    // Arrange
    let service = ContactFeatureServiceImpl::new(MockDatabase::untouched(), ContactRepo::new());
    let mut body = valid_body();
    body["phone"] = json!("call me");

    // Act
    let (status, _, body) = send(router(service), post_json("/api/contact", &body)).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"], json!({"phone": "Enter a valid phone number."}));
}

#[tokio::test]
async fn malformed_body() {
    for body in ["{\"name\": ", "{\"name\": 42}", "\"just a string\""] {
        // Arrange
        let request = Request::post("/api/contact")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        // Act
        let (status, _, response) =
            send(router(MockContactFeatureService::new()), request).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(
            response,
            json!({
                "ok": false,
                "kind": "malformed_request",
                "error": "Malformed request body.",
            })
        );
    }
}

#[tokio::test]
async fn method_not_allowed() {
    for (method, path) in [
        ("GET", "/api/contact"),
        ("PUT", "/api/contact"),
        ("DELETE", "/api/contact.js"),
    ] {
        // Arrange
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();

        // Act
        let (status, headers, body) =
            send(router(MockContactFeatureService::new()), request).await;

        // Assert
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body,
            json!({
                "ok": false,
                "kind": "method_not_allowed",
                "error": "Method not allowed",
            })
        );
        assert!(headers.contains_key("x-request-id"));
    }
}

#[tokio::test]
async fn storage_failure() {
    // Arrange
    let (logs, _guard) = CapturedLogs::start();
    let service = ContactFeatureServiceImpl::new(
        MockDatabase::build(false),
        ContactRepo::new().with_create_error(
            submission(None),
            "duplicate key value violates unique constraint \"contact_messages_pkey\"",
        ),
    );

    // Act
    let (status, _, body) = send(router(service), post_json("/api/contact", &valid_body())).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"ok": false, "kind": "server", "error": "Server error"})
    );
    assert!(!body.to_string().contains("duplicate key"));

    let logs = logs.contents();
    assert!(logs.contains("Failed to save contact message in database"), "{logs}");
    assert!(logs.contains("duplicate key value violates unique constraint"), "{logs}");
}

#[tokio::test]
async fn unreachable_database() {
    // Arrange
    let service = ContactFeatureServiceImpl::new(
        MockDatabase::new().with_begin_transaction_error("connection refused"),
        ContactRepo::new(),
    );

    // Act
    let (status, _, body) = send(router(service), post_json("/api/contact", &valid_body())).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "server");
}

struct PanickingContactService;

impl ContactFeatureService for PanickingContactService {
    async fn submit(
        &self,
        _cmd: ContactSubmitCommand,
    ) -> Result<ContactMessageRecord, ContactSubmitError> {
        panic!("contact service exploded")
    }
}

#[tokio::test]
async fn handler_panic() {
    // Arrange
    let (logs, _guard) = CapturedLogs::start();

    // Act
    let (status, _, body) = send(
        router(PanickingContactService),
        post_json("/api/contact", &valid_body()),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"ok": false, "kind": "server", "error": "Server error"})
    );
    assert!(logs.contents().contains("contact service exploded"));
}
