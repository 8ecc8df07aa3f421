use o5_models::contact::{ContactField, ContactForm};

/// A message shown to the user after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// The contact form as presented to the user.
pub trait ContactFormView {
    /// Current values of all inputs.
    fn values(&self) -> ContactForm;

    /// Whether the form contains a phone input. Only then the phone number is
    /// required.
    fn has_phone_input(&self) -> bool;

    /// Dial code of the selected country without the leading `+`, if any.
    fn dial_code(&self) -> Option<String>;

    fn set_field_error(&mut self, field: ContactField, message: &str);

    fn clear_field_errors(&mut self);

    fn focus(&mut self, field: ContactField);

    fn submit_label(&self) -> String;

    fn set_submit_label(&mut self, label: &str);

    fn set_submit_enabled(&mut self, enabled: bool);

    fn notify(&mut self, notification: Notification);

    /// Clear all inputs.
    fn reset(&mut self);
}
