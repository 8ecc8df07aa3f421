use chrono::{DateTime, TimeZone, Utc};
use o5_core_contact_contracts::ContactSubmitCommand;
use o5_models::contact::{
    ContactForm, ContactMessageCreated, ContactMessageId, ContactSubmission,
};
use o5_persistence_contracts::{contact::MockContactRepository, MockDatabase, MockTransaction};

use crate::ContactFeatureServiceImpl;


type Sut = ContactFeatureServiceImpl<MockDatabase, MockContactRepository<MockTransaction>>;

fn form() -> ContactForm {
    ContactForm {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        phone: "+1 4165551234".into(),
        subject: "Hello there".into(),
        message: "This is a test message.".into(),
    }
}

fn command(form: ContactForm) -> ContactSubmitCommand {
    ContactSubmitCommand {
        form,
        ip: Some("203.0.113.7".into()),
        user_agent: Some("Mozilla/5.0".into()),
    }
}

fn submission() -> ContactSubmission {
    ContactSubmission::from_form(
        &form(),
        Some("203.0.113.7".into()),
        Some("Mozilla/5.0".into()),
    )
    .unwrap()
}

fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 17, 12, 30, 0).unwrap()
}

fn created(id: i64) -> ContactMessageCreated {
    ContactMessageCreated {
        id: ContactMessageId::from(id),
        created_at: created_at(),
    }
}
