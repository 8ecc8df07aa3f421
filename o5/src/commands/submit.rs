use clap::Args;
use o5_client::{ContactFormView, Notification, SubmissionController, SubmissionOutcome};
use o5_config::Config;
use o5_di::Provide;
use o5_models::contact::{ContactField, ContactForm};
use o5_utils::Apply;
use url::Url;

use crate::environment::{types::ContactApi, ConfigProvider};

/// Fill in the contact form from the command line and send it.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    /// National phone number with exactly ten digits
    #[arg(long)]
    phone: String,
    /// Dial code of the phone number, e.g. `1` or `+44`
    #[arg(long)]
    dial_code: Option<String>,
    #[arg(long)]
    subject: String,
    #[arg(long)]
    message: String,
    /// Send the form to this url instead of the configured endpoint
    #[arg(long)]
    endpoint: Option<Url>,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let api: ContactApi = ConfigProvider::new(&config)
            .apply_map(self.endpoint, ConfigProvider::with_client_endpoint)
            .provide();

        let view = TerminalView {
            form: ContactForm {
                name: self.name,
                email: self.email,
                phone: self.phone,
                subject: self.subject,
                message: self.message,
            },
            dial_code: self.dial_code,
            label: "Send".into(),
        };

        match SubmissionController::new(view, api).submit().await {
            SubmissionOutcome::Sent(receipt) => {
                if let Some(id) = receipt.id {
                    println!("{id}");
                }
                Ok(())
            }
            SubmissionOutcome::Invalid(errors) => {
                anyhow::bail!("Contact form is invalid: {errors}")
            }
            SubmissionOutcome::Failed(err) => Err(err.into()),
        }
    }
}

/// Presents the contact form on the terminal.
struct TerminalView {
    form: ContactForm,
    dial_code: Option<String>,
    label: String,
}

impl ContactFormView for TerminalView {
    fn values(&self) -> ContactForm {
        self.form.clone()
    }

    fn has_phone_input(&self) -> bool {
        true
    }

    fn dial_code(&self) -> Option<String> {
        self.dial_code.clone()
    }

    fn set_field_error(&mut self, field: ContactField, message: &str) {
        eprintln!("--{field}: {message}");
    }

    fn clear_field_errors(&mut self) {}

    fn focus(&mut self, _field: ContactField) {}

    fn submit_label(&self) -> String {
        self.label.clone()
    }

    fn set_submit_label(&mut self, label: &str) {
        if label != self.label {
            eprintln!("{label}");
        }
        self.label = label.into();
    }

    fn set_submit_enabled(&mut self, _enabled: bool) {}

    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::Success(message) => eprintln!("{message}"),
            Notification::Error(message) => eprintln!("Error: {message}"),
        }
    }

    fn reset(&mut self) {
        self.form = ContactForm::default();
    }
}
