use std::future::Future;

use o5_models::contact::{
    ContactMessageCreated, ContactMessageId, ContactMessageRecord, ContactSubmission,
};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactRepository<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Store a new contact message.
    ///
    /// Returns the identifier and creation timestamp assigned by the database.
    fn create(
        &self,
        txn: &mut Txn,
        submission: &ContactSubmission,
    ) -> impl Future<Output = anyhow::Result<ContactMessageCreated>> + Send;

    /// Return the stored contact message with the given id.
    fn get(
        &self,
        txn: &mut Txn,
        id: ContactMessageId,
    ) -> impl Future<Output = anyhow::Result<Option<ContactMessageRecord>>> + Send;

    /// Return the total number of stored contact messages.
    fn count(&self, txn: &mut Txn) -> impl Future<Output = anyhow::Result<u64>> + Send;
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockContactRepository<Txn> {
    pub fn with_create(
        mut self,
        submission: ContactSubmission,
        result: ContactMessageCreated,
    ) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(submission),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_create_error(mut self, submission: ContactSubmission, err: &'static str) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(submission),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Err(anyhow::anyhow!(err)))));
        self
    }
}
