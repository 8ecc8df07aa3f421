//! Client side of the contact form.
//!
//! [`SubmissionController`] validates the form shown by a [`ContactFormView`]
//! and sends it to the server using a [`ContactApiService`].

pub use api::{
    ContactApiError, ContactApiService, ContactApiServiceConfig, ContactApiServiceImpl,
    ContactReceipt, ContactRequest,
};
#[cfg(feature = "mock")]
pub use api::MockContactApiService;
pub use controller::{
    validate_form, SubmissionController, SubmissionOutcome, SubmissionState, BUSY_LABEL,
    PHONE_DIGITS_MESSAGE, SUCCESS_MESSAGE,
};
pub use view::{ContactFormView, Notification};

mod api;
mod controller;
mod http;
mod view;
