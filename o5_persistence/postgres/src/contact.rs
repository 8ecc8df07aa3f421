use anyhow::Context;
use bb8_postgres::tokio_postgres::Row;
use o5_di::Build;
use o5_models::contact::{
    ContactMessageCreated, ContactMessageId, ContactMessageRecord, ContactSubmission,
};
use o5_persistence_contracts::contact::ContactRepository;
use o5_utils::trace_instrument;

use crate::{arg_indices, columns, PostgresTransaction};

#[derive(Debug, Clone, Copy, Build)]
pub struct PostgresContactRepository;

columns!(contact_message as "m": "name", "email", "phone", "subject", "message", "ip", "user_agent");

impl ContactRepository<PostgresTransaction> for PostgresContactRepository {
    #[trace_instrument(skip(self, txn))]
    async fn create(
        &self,
        txn: &mut PostgresTransaction,
        submission: &ContactSubmission,
    ) -> anyhow::Result<ContactMessageCreated> {
        txn.txn()
            .query_one(
                &format!(
                    "insert into contact_messages ({CONTACT_MESSAGE_COL_NAMES}) values ({}) \
                     returning id, created_at",
                    arg_indices(1..=CONTACT_MESSAGE_CNT)
                ),
                &[
                    &submission.name.as_str(),
                    &submission.email.as_str(),
                    &submission.phone.as_deref().map(String::as_str),
                    &submission.subject.as_str(),
                    &submission.message.as_str(),
                    &submission.ip.as_deref(),
                    &submission.user_agent.as_deref(),
                ],
            )
            .await
            .context("Failed to insert contact message")
            .map(|row| ContactMessageCreated {
                id: row.get::<_, i64>(0).into(),
                created_at: row.get(1),
            })
    }

    #[trace_instrument(skip(self, txn))]
    async fn get(
        &self,
        txn: &mut PostgresTransaction,
        id: ContactMessageId,
    ) -> anyhow::Result<Option<ContactMessageRecord>> {
        txn.txn()
            .query_opt(
                &format!(
                    "select m.id, m.created_at, {CONTACT_MESSAGE_COLS} from contact_messages m \
                     where m.id=$1"
                ),
                &[&*id],
            )
            .await
            .context("Failed to load contact message")?
            .map(|row| decode_record(&row))
            .transpose()
    }

    #[trace_instrument(skip(self, txn))]
    async fn count(&self, txn: &mut PostgresTransaction) -> anyhow::Result<u64> {
        txn.txn()
            .query_one("select count(*) from contact_messages", &[])
            .await
            .map(|row| row.get::<_, i64>(0) as _)
            .map_err(Into::into)
    }
}

fn decode_record(row: &Row) -> anyhow::Result<ContactMessageRecord> {
    let mut offset = 0;
    let mut idx = || {
        offset += 1;
        offset - 1
    };

    Ok(ContactMessageRecord {
        id: row.get::<_, i64>(idx()).into(),
        created_at: row.get(idx()),
        submission: ContactSubmission {
            name: row.get::<_, String>(idx()).try_into()?,
            email: row.get::<_, String>(idx()).try_into()?,
            phone: row
                .get::<_, Option<String>>(idx())
                .map(TryInto::try_into)
                .transpose()?,
            subject: row.get::<_, String>(idx()).try_into()?,
            message: row.get::<_, String>(idx()).try_into()?,
            ip: row.get(idx()),
            user_agent: row.get(idx()),
        },
    })
}
