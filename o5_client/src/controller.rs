use std::collections::BTreeMap;

use o5_models::contact::{
    validate::{
        is_empty, is_plausible_phone, is_valid_email, is_valid_message, is_valid_name,
        is_valid_phone_digits, is_valid_subject, normalize_phone,
    },
    ContactField, ContactForm, ContactValidationErrors,
};
use tracing::{debug, warn};

use crate::{
    api::{ContactApiError, ContactApiService, ContactReceipt, ContactRequest},
    view::{ContactFormView, Notification},
};

/// Label of the submit control while a submission is in flight.
pub const BUSY_LABEL: &str = "Sending...";
pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const PHONE_DIGITS_MESSAGE: &str = "Phone number must be exactly 10 digits.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Invalid,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The form was not sent because some fields are invalid.
    Invalid(ContactValidationErrors),
    Sent(ContactReceipt),
    Failed(ContactApiError),
}

/// Validate the raw form values like the contact form does before sending.
///
/// Unlike the server, the form requires a phone number with exactly ten
/// national digits whenever it has a phone input. The number as it will be
/// sent, see [`normalize_phone`], must also pass the server's phone rule.
pub fn validate_form(
    form: &ContactForm,
    has_phone_input: bool,
    dial_code: Option<&str>,
) -> ContactValidationErrors {
    let mut errors = ContactValidationErrors::new();

    check(&mut errors, ContactField::Name, &form.name, is_valid_name);
    check(&mut errors, ContactField::Email, &form.email, is_valid_email);
    if has_phone_input {
        let field = ContactField::Phone;
        if is_empty(Some(&form.phone)) {
            errors.add(field, field.required_message());
        } else if !is_valid_phone_digits(&form.phone) {
            errors.add(field, PHONE_DIGITS_MESSAGE);
        } else if !is_plausible_phone(&normalize_phone(&form.phone, dial_code)) {
            errors.add(field, field.invalid_message());
        }
    }
    check(&mut errors, ContactField::Subject, &form.subject, is_valid_subject);
    check(&mut errors, ContactField::Message, &form.message, is_valid_message);

    errors
}

fn check(
    errors: &mut ContactValidationErrors,
    field: ContactField,
    value: &str,
    valid: fn(&str) -> bool,
) {
    if is_empty(Some(value)) {
        errors.add(field, field.required_message());
    } else if !valid(value) {
        errors.add(field, field.invalid_message());
    }
}

/// Drives a contact form from submission to the final notification.
#[derive(Debug)]
pub struct SubmissionController<View, Api> {
    view: View,
    api: Api,
    state: SubmissionState,
    history: Vec<SubmissionState>,
}

impl<View, Api> SubmissionController<View, Api>
where
    View: ContactFormView,
    Api: ContactApiService,
{
    pub fn new(view: View, api: Api) -> Self {
        Self {
            view,
            api,
            state: SubmissionState::Idle,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// All states entered during the last submission, in order.
    pub fn history(&self) -> &[SubmissionState] {
        &self.history
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn into_view(self) -> View {
        self.view
    }

    /// Validate the form and, if every field is valid, send it.
    ///
    /// The submit control is disabled while the request is in flight and
    /// restored afterwards, whatever the result.
    pub async fn submit(&mut self) -> SubmissionOutcome {
        self.history.clear();
        self.transition(SubmissionState::Validating);

        self.view.clear_field_errors();
        let form = self.view.values();
        let dial_code = self.view.dial_code();
        let errors = validate_form(&form, self.view.has_phone_input(), dial_code.as_deref());

        if let Some(first) = errors.first() {
            debug!(%errors, "contact form is invalid");
            for (field, message) in errors.iter() {
                self.view.set_field_error(field, message);
            }
            self.view.focus(first);
            self.transition(SubmissionState::Invalid);
            self.transition(SubmissionState::Idle);
            return SubmissionOutcome::Invalid(errors);
        }

        self.transition(SubmissionState::Submitting);
        let label = self.view.submit_label();
        self.view.set_submit_enabled(false);
        self.view.set_submit_label(BUSY_LABEL);

        let request = ContactRequest::new(form, dial_code.as_deref());
        let outcome = match self.api.send(&request).await {
            Ok(receipt) => {
                debug!(?receipt, "contact form sent");
                self.view
                    .notify(Notification::Success(SUCCESS_MESSAGE.into()));
                self.view.reset();
                self.transition(SubmissionState::Success);
                SubmissionOutcome::Sent(receipt)
            }
            Err(err) => {
                warn!("failed to send contact form: {err}");
                if let ContactApiError::Rejected { fields, .. } = &err {
                    self.show_server_field_errors(fields);
                }
                self.view
                    .notify(Notification::Error(err.user_message().into()));
                self.transition(SubmissionState::Failed);
                SubmissionOutcome::Failed(err)
            }
        };

        self.view.set_submit_enabled(true);
        self.view.set_submit_label(&label);
        self.transition(SubmissionState::Idle);

        outcome
    }

    /// Annotate the fields the server rejected and focus the first one.
    /// Unknown field names are ignored.
    fn show_server_field_errors(&mut self, fields: &BTreeMap<String, String>) {
        let mut rejected = ContactField::ALL
            .into_iter()
            .filter_map(|field| Some((field, fields.get(field.as_str())?)))
            .peekable();

        let Some(&(first, _)) = rejected.peek() else {
            return;
        };
        for (field, message) in rejected {
            self.view.set_field_error(field, message);
        }
        self.view.focus(first);
    }

    fn transition(&mut self, state: SubmissionState) {
        self.state = state;
        self.history.push(state);
    }
}
