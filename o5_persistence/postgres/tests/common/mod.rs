use o5_persistence_postgres::{PostgresDatabase, PostgresDatabaseConfig};
use tokio::sync::{Mutex, MutexGuard};

pub type Db = PostgresDatabase;

/// Held by each test for its whole duration, as every test resets the shared
/// database.
static DATABASE: Mutex<()> = Mutex::const_new(());

pub async fn setup() -> (Db, MutexGuard<'static, ()>) {
    let lock = DATABASE.lock().await;
    let config = o5_config::load(&[o5_config::DEFAULT_CONFIG_PATH]).unwrap();

    let db = Db::connect(&PostgresDatabaseConfig {
        url: config.database.url,
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        acquire_timeout: config.database.acquire_timeout.into(),
        idle_timeout: config.database.idle_timeout.map(Into::into),
        max_lifetime: config.database.max_lifetime.map(Into::into),
    })
    .await
    .unwrap();

    db.reset().await.unwrap();
    (db, lock)
}
