use anyhow::Context;
use o5_core_contact_contracts::{ContactFeatureService, ContactSubmitCommand, ContactSubmitError};
use o5_di::Build;
use o5_models::contact::{ContactMessageRecord, ContactSubmission};
use o5_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use o5_utils::trace_instrument;
use tracing::info;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Build, Default)]
pub struct ContactFeatureServiceImpl<Db, ContactRepo> {
    db: Db,
    contact_repo: ContactRepo,
}

impl<Db, ContactRepo> ContactFeatureServiceImpl<Db, ContactRepo> {
    pub fn new(db: Db, contact_repo: ContactRepo) -> Self {
        Self { db, contact_repo }
    }
}

impl<Db, ContactRepo> ContactFeatureService for ContactFeatureServiceImpl<Db, ContactRepo>
where
    Db: Database,
    ContactRepo: ContactRepository<Db::Transaction>,
{
    #[trace_instrument(skip(self))]
    async fn submit(
        &self,
        cmd: ContactSubmitCommand,
    ) -> Result<ContactMessageRecord, ContactSubmitError> {
        let submission = ContactSubmission::from_form(&cmd.form, cmd.ip, cmd.user_agent)
            .map_err(ContactSubmitError::Validation)?;

        let mut txn = self.db.begin_transaction().await?;

        let created = self
            .contact_repo
            .create(&mut txn, &submission)
            .await
            .context("Failed to save contact message in database")?;

        txn.commit().await?;

        info!(id = %created.id, "stored contact message");

        Ok(ContactMessageRecord::new(created, submission))
    }
}
