use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use o5_core_contact_contracts::{ContactFeatureService, ContactSubmitCommand, ContactSubmitError};

use crate::{
    errors::{internal_server_error, method_not_allowed, validation_error},
    extractors::{contact_body::ContactBody, user_agent::UserAgent},
    middlewares::client_ip::ClientIp,
    models::contact::ApiContactMessageSaved,
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(
            "/api/contact",
            routing::post(submit).fallback(method_not_allowed_handler),
        )
        .route(
            "/api/contact.js",
            routing::post(submit).fallback(method_not_allowed_handler),
        )
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    Extension(ClientIp(ip)): Extension<ClientIp>,
    UserAgent(user_agent): UserAgent,
    ContactBody(form): ContactBody,
) -> Response {
    let cmd = ContactSubmitCommand {
        form: form.into(),
        ip,
        user_agent,
    };

    match service.submit(cmd).await {
        Ok(record) => Json(ApiContactMessageSaved::from(record)).into_response(),
        Err(ContactSubmitError::Validation(errors)) => validation_error(errors),
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}

async fn method_not_allowed_handler() -> Response {
    method_not_allowed()
}
