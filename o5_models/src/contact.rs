use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::macros::nutype_string;

pub mod validate;

#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deref,
    From,
    Display,
    Serialize,
    Deserialize,
))]
pub struct ContactMessageId(i64);

nutype_string!(ContactName(validate(predicate = |s: &str| validate::is_valid_name(s))));
nutype_string!(ContactEmail(validate(predicate = |s: &str| validate::is_valid_email(s))));
nutype_string!(ContactPhone(validate(predicate = |s: &str| validate::is_plausible_phone(s))));
nutype_string!(ContactSubject(validate(predicate = |s: &str| validate::is_valid_subject(s))));
nutype_string!(ContactMessageContent(validate(predicate = |s: &str| validate::is_valid_message(s))));

/// The raw values of a contact form, exactly as typed or received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// A validated contact form submission together with request metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: Option<ContactPhone>,
    pub subject: ContactSubject,
    pub message: ContactMessageContent,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Identifier and timestamp generated by the database when a contact message
/// is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactMessageCreated {
    pub id: ContactMessageId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageRecord {
    pub id: ContactMessageId,
    pub created_at: DateTime<Utc>,
    pub submission: ContactSubmission,
}

impl ContactMessageRecord {
    pub fn new(created: ContactMessageCreated, submission: ContactSubmission) -> Self {
        Self {
            id: created.id,
            created_at: created.created_at,
            submission,
        }
    }
}

/// The fields of the contact form in the order they appear on the page.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Subject,
        Self::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    pub fn required_message(self) -> &'static str {
        match self {
            Self::Name => "Name is required.",
            Self::Email => "Email is required.",
            Self::Phone => "Phone number is required.",
            Self::Subject => "Subject is required.",
            Self::Message => "Message is required.",
        }
    }

    pub fn invalid_message(self) -> &'static str {
        match self {
            Self::Name => "Enter a valid name.",
            Self::Email => "Enter a valid email address.",
            Self::Phone => "Enter a valid phone number.",
            Self::Subject => "Subject should be 3-120 characters.",
            Self::Message => "Message should be 10-2000 characters.",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

/// Validation failures keyed by field, ordered like the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactValidationErrors(BTreeMap<ContactField, &'static str>);

impl ContactValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`. The first error recorded for a field wins.
    pub fn add(&mut self, field: ContactField, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    pub fn get(&self, field: ContactField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// The first invalid field in form order.
    pub fn first(&self) -> Option<ContactField> {
        self.0.keys().next().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &'static str)> + '_ {
        self.0.iter().map(|(&field, &message)| (field, message))
    }
}

impl std::fmt::Display for ContactValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ContactValidationErrors {}

impl ContactSubmission {
    /// Validate a contact form.
    ///
    /// Every field is checked so that all problems can be reported at once.
    /// Blank fields yield the "required" message of the field, malformed ones
    /// the "invalid" message. The phone number is optional.
    pub fn from_form(
        form: &ContactForm,
        ip: Option<String>,
        user_agent: Option<String>,
    ) -> Result<Self, ContactValidationErrors> {
        let mut errors = ContactValidationErrors::new();

        let name = required(&mut errors, ContactField::Name, &form.name, |v| {
            ContactName::try_new(v)
        });
        let email = required(
            &mut errors,
            ContactField::Email,
            &form.email,
            |v| ContactEmail::try_new(v),
        );
        let phone = optional(
            &mut errors,
            ContactField::Phone,
            &form.phone,
            |v| ContactPhone::try_new(v),
        );
        let subject = required(
            &mut errors,
            ContactField::Subject,
            &form.subject,
            |v| ContactSubject::try_new(v),
        );
        let message = required(
            &mut errors,
            ContactField::Message,
            &form.message,
            |v| ContactMessageContent::try_new(v),
        );

        match (name, email, phone, subject, message) {
            (Some(name), Some(email), Some(phone), Some(subject), Some(message)) => Ok(Self {
                name,
                email,
                phone,
                subject,
                message,
                ip: ip.filter(|ip| !ip.is_empty()),
                user_agent: user_agent.filter(|ua| !ua.is_empty()),
            }),
            _ => Err(errors),
        }
    }
}

fn required<T, E>(
    errors: &mut ContactValidationErrors,
    field: ContactField,
    value: &str,
    parse: impl FnOnce(String) -> Result<T, E>,
) -> Option<T> {
    if validate::is_empty(Some(value)) {
        errors.add(field, field.required_message());
        return None;
    }

    parse(value.to_owned())
        .inspect_err(|_| errors.add(field, field.invalid_message()))
        .ok()
}

fn optional<T, E>(
    errors: &mut ContactValidationErrors,
    field: ContactField,
    value: &str,
    parse: impl FnOnce(String) -> Result<T, E>,
) -> Option<Option<T>> {
    if validate::is_empty(Some(value)) {
        return Some(None);
    }

    parse(value.to_owned())
        .inspect_err(|_| errors.add(field, field.invalid_message()))
        .ok()
        .map(Some)
}
