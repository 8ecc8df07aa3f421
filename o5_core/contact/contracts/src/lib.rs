use std::future::Future;

use o5_models::contact::{ContactForm, ContactMessageRecord, ContactValidationErrors};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a contact form and store it as a new contact message.
    ///
    /// The database is not touched unless every field is valid.
    fn submit(
        &self,
        cmd: ContactSubmitCommand,
    ) -> impl Future<Output = Result<ContactMessageRecord, ContactSubmitError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmitCommand {
    pub form: ContactForm,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Invalid contact form: {0}")]
    Validation(ContactValidationErrors),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        cmd: ContactSubmitCommand,
        result: Result<ContactMessageRecord, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(cmd))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
