use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::Response,
    Form, Json,
};
use tracing::debug;

use crate::{errors::malformed_request, models::contact::ApiContactForm};

/// Contact form sent either as json or as `application/x-www-form-urlencoded`.
///
/// An empty body yields an empty form, so that it is answered with the usual
/// validation errors.
pub struct ContactBody(pub ApiContactForm);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for ContactBody {
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            return Form::<ApiContactForm>::from_request(request, state)
                .await
                .map(|Form(form)| Self(form))
                .map_err(|err| {
                    debug!("failed to decode form body: {err}");
                    malformed_request()
                });
        }

        let body = Bytes::from_request(request, state).await.map_err(|err| {
            debug!("failed to read request body: {err}");
            malformed_request()
        })?;

        if body.trim_ascii().is_empty() {
            return Ok(Self(ApiContactForm::default()));
        }

        Json::<ApiContactForm>::from_bytes(&body)
            .map(|Json(form)| Self(form))
            .map_err(|err| {
                debug!("failed to decode json body: {err}");
                malformed_request()
            })
    }
}
