use o5_config::Config;
use o5_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use o5_persistence_postgres::contact::PostgresContactRepository;
use tracing::info;

use crate::database;

pub async fn check_config(config: Config, verbose: bool, ping: bool) -> anyhow::Result<()> {
    if verbose {
        println!("{config:#?}");
    }

    if ping {
        info!("Connecting to database");
        let database = database::connect(&config.database).await?;
        database.ping().await?;

        let mut txn = database.begin_transaction().await?;
        let count = PostgresContactRepository.count(&mut txn).await?;
        txn.rollback().await?;

        println!("Database is reachable, {count} contact messages stored");
    }

    Ok(())
}
