use std::{fmt::Write, time::Duration};

use anyhow::{anyhow, Context};
use bb8::{Pool, PooledConnection};
use bb8_postgres::{
    tokio_postgres::{self, NoTls},
    PostgresConnectionManager,
};
use o5_persistence_contracts::{Database, Transaction};
use o5_utils::trace_instrument;
use ouroboros::self_referencing;
use tracing::trace;

pub mod contact;

type PgPooledConnection = PooledConnection<'static, PostgresConnectionManager<NoTls>>;
type PgTransaction<'a> = tokio_postgres::Transaction<'a>;

/// The logical schema of all tables used by this crate.
pub const SCHEMA: &str = include_str!("../schema.sql");

#[derive(Debug, Clone)]
pub struct PostgresDatabase {
    pool: Pool<PostgresConnectionManager<NoTls>>,
}

#[derive(Debug)]
pub struct PostgresDatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl PostgresDatabase {
    /// Create the connection pool.
    ///
    /// Only `min_connections` connections are opened eagerly, all others are
    /// established on demand.
    pub async fn connect(config: &PostgresDatabaseConfig) -> anyhow::Result<Self> {
        let pool = pool_builder(config)
            .build(connection_manager(config)?)
            .await
            .context("Failed to connect to database")?;

        Ok(Self { pool })
    }

    /// Create the connection pool without establishing any connection.
    ///
    /// Connections are opened when first needed, so configuration errors
    /// other than an unparsable url only surface on the first query.
    pub fn connect_lazy(config: &PostgresDatabaseConfig) -> anyhow::Result<Self> {
        let pool = pool_builder(config).build_unchecked(connection_manager(config)?);
        Ok(Self { pool })
    }

    /// Drop all tables and recreate the schema.
    pub async fn reset(&self) -> anyhow::Result<()> {
        self.execute("drop schema public cascade; create schema public;")
            .await
            .context("Failed to drop and recreate schema public")?;
        self.execute(SCHEMA)
            .await
            .context("Failed to create tables")
    }

    pub async fn execute(&self, query: &str) -> anyhow::Result<()> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire database connection")?;
        conn.batch_execute(query)
            .await
            .context("Failed to execute query")?;
        Ok(())
    }
}

fn connection_manager(
    config: &PostgresDatabaseConfig,
) -> anyhow::Result<PostgresConnectionManager<NoTls>> {
    let url = config
        .url
        .parse()
        .context("Failed to parse database url")?;
    Ok(PostgresConnectionManager::new(url, NoTls))
}

fn pool_builder(config: &PostgresDatabaseConfig) -> bb8::Builder<PostgresConnectionManager<NoTls>> {
    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(config.min_connections)
        .connection_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
}

impl Database for PostgresDatabase {
    type Transaction = PostgresTransaction;

    async fn begin_transaction(&self) -> anyhow::Result<Self::Transaction> {
        trace!("begin transaction");

        let conn = self
            .pool
            .get_owned()
            .await
            .context("Failed to acquire database connection")?;

        PostgresTransactionAsyncSendTryBuilder {
            conn,
            txn_builder: |conn| Box::pin(async move { conn.transaction().await.map(Some) }),
        }
        .try_build()
        .await
        .context("Failed to begin transaction")
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire database connection")?;

        conn.query_one("select 1", &[])
            .await
            .map_err(Into::into)
            .map(|row| row.get(0))
            .and_then(|res: i32| {
                (res == 1)
                    .then_some(())
                    .ok_or_else(|| anyhow!("Expected a result of 1, got {res} instead"))
            })
            .context("Failed to ping database")
    }
}

#[self_referencing]
pub struct PostgresTransaction {
    conn: PgPooledConnection,
    #[borrows(mut conn)]
    #[covariant]
    txn: Option<PgTransaction<'this>>,
}

impl PostgresTransaction {
    // `txn` is only taken by `commit` and `rollback`, which consume `self`.
    fn txn(&self) -> &PgTransaction<'_> {
        self.borrow_txn().as_ref().unwrap()
    }
}

impl Transaction for PostgresTransaction {
    async fn commit(mut self) -> anyhow::Result<()> {
        trace!("commit transaction");

        self.with_txn_mut(|txn| txn.take())
            .unwrap()
            .commit()
            .await
            .context("Failed to commit transaction")
    }

    async fn rollback(mut self) -> anyhow::Result<()> {
        trace!("rollback transaction");

        self.with_txn_mut(|txn| txn.take())
            .unwrap()
            .rollback()
            .await
            .context("Failed to rollback transaction")
    }
}

macro_rules! columns {
    ($vis:vis $ident:ident as $alias:literal: $fst:literal $(, $col:literal)* $(,)?) => {
        ::paste::paste! {
            #[allow(unused, reason = "usually not needed for inserts")]
            $vis const [< $ident:snake:upper _CNT >]: usize = [ $fst $(, $col)* ].len();
            #[allow(unused, reason = "usually not needed for inserts")]
            $vis const [< $ident:snake:upper _COLS >]: &str = ::core::concat!( '"', $alias, "\".\"", $fst, '"' $(, ", \"" , $alias, "\".\"", $col, '"' )* );
            $vis const [< $ident:snake:upper _COL_NAMES >]: &str = ::core::concat!( '"', $fst, '"' $(, ", \"", $col, '"' )* );
        }
    };
}
use columns;

fn arg_indices(indices: impl IntoIterator<Item = usize>) -> String {
    let mut it = indices.into_iter();
    let mut out = String::new();
    if let Some(x) = it.next() {
        let _ = write!(&mut out, "${x}");
    }
    for x in it {
        let _ = write!(&mut out, ", ${x}");
    }
    out
}
