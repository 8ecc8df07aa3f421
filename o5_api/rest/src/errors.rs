use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use o5_models::contact::ContactValidationErrors;
use serde::Serialize;

pub const VALIDATION_ERROR: &str = "Please correct the highlighted fields.";
pub const MALFORMED_REQUEST_ERROR: &str = "Malformed request body.";
pub const METHOD_NOT_ALLOWED_ERROR: &str = "Method not allowed";
pub const SERVER_ERROR: &str = "Server error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    Validation,
    MalformedRequest,
    MethodNotAllowed,
    Server,
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub ok: bool,
    pub kind: ApiErrorKind,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ContactValidationErrors>,
}

pub fn error(code: StatusCode, kind: ApiErrorKind, message: &'static str) -> Response {
    respond(code, kind, message, None)
}

pub fn validation_error(fields: ContactValidationErrors) -> Response {
    respond(
        StatusCode::BAD_REQUEST,
        ApiErrorKind::Validation,
        VALIDATION_ERROR,
        Some(fields),
    )
}

pub fn malformed_request() -> Response {
    error(
        StatusCode::BAD_REQUEST,
        ApiErrorKind::MalformedRequest,
        MALFORMED_REQUEST_ERROR,
    )
}

pub fn method_not_allowed() -> Response {
    error(
        StatusCode::METHOD_NOT_ALLOWED,
        ApiErrorKind::MethodNotAllowed,
        METHOD_NOT_ALLOWED_ERROR,
    )
}

/// Log `err` including its full context chain and respond with a generic
/// server error.
pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiErrorKind::Server,
        SERVER_ERROR,
    )
}

fn respond(
    code: StatusCode,
    kind: ApiErrorKind,
    message: &'static str,
    fields: Option<ContactValidationErrors>,
) -> Response {
    (
        code,
        Json(ApiError {
            ok: false,
            kind,
            error: message,
            fields,
        }),
    )
        .into_response()
}
