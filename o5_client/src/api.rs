use std::{collections::BTreeMap, future::Future, sync::Arc};

use chrono::{DateTime, Utc};
use o5_di::Build;
use o5_models::contact::{validate::normalize_phone, ContactForm};
use o5_utils::trace_instrument;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::http::HttpClient;

pub const GENERIC_REJECTION_MESSAGE: &str = "Something went wrong.";
pub const NETWORK_ERROR_MESSAGE: &str = "Server error. Please try again.";

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    /// Send a contact form to the server.
    fn send(
        &self,
        request: &ContactRequest,
    ) -> impl Future<Output = Result<ContactReceipt, ContactApiError>> + Send;
}

/// Body of the request sent to the contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    /// Build the request from the raw form values. If a dial code is given the
    /// phone number is sent in international format.
    pub fn new(form: ContactForm, dial_code: Option<&str>) -> Self {
        Self {
            phone: normalize_phone(&form.phone, dial_code),
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
        }
    }
}

/// Confirmation returned by the server. All fields are optional, a successful
/// status code alone is sufficient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactReceipt {
    pub id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ContactApiError {
    #[error("The server rejected the request with status {status}.")]
    Rejected {
        status: u16,
        message: Option<String>,
        fields: BTreeMap<String, String>,
    },
    #[error("Failed to reach the server: {0:#}")]
    Network(anyhow::Error),
}

impl ContactApiError {
    /// The message to show to the user.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(GENERIC_REJECTION_MESSAGE),
            Self::Network(_) => NETWORK_ERROR_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Build)]
pub struct ContactApiServiceImpl {
    config: ContactApiServiceConfig,
    #[state]
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ContactApiServiceConfig {
    pub endpoint: Arc<Url>,
}

impl ContactApiService for ContactApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn send(&self, request: &ContactRequest) -> Result<ContactReceipt, ContactApiError> {
        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(request)
            .send()
            .await
            .map_err(|err| ContactApiError::Network(err.into()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| ContactApiError::Network(err.into()))?;
        let body = serde_json::from_slice::<ResponseBody>(&body).unwrap_or_default();

        if !status.is_success() {
            return Err(ContactApiError::Rejected {
                status: status.as_u16(),
                message: body.error,
                fields: body.fields,
            });
        }

        Ok(ContactReceipt {
            id: body.id,
            created_at: body.created_at,
            message: body.message,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ResponseBody {
    id: Option<i64>,
    created_at: Option<DateTime<Utc>>,
    message: Option<String>,
    error: Option<String>,
    fields: BTreeMap<String, String>,
}

#[cfg(any(test, feature = "mock"))]
impl MockContactApiService {
    pub fn with_send(
        mut self,
        request: ContactRequest,
        result: Result<ContactReceipt, ContactApiError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
