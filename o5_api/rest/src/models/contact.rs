use chrono::{DateTime, Utc};
use o5_models::contact::{ContactForm, ContactMessageRecord};
use serde::{Deserialize, Serialize};

pub const SAVED_MESSAGE: &str = "Saved successfully";

/// Incoming contact form. Missing fields and `null` are treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl From<ApiContactForm> for ContactForm {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            phone: value.phone.unwrap_or_default(),
            subject: value.subject.unwrap_or_default(),
            message: value.message.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactMessageSaved {
    pub ok: bool,
    pub message: &'static str,
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessageRecord> for ApiContactMessageSaved {
    fn from(value: ContactMessageRecord) -> Self {
        Self {
            ok: true,
            message: SAVED_MESSAGE,
            id: *value.id,
            created_at: value.created_at,
        }
    }
}
