use std::{collections::HashMap, net::IpAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Prefix of environment variables overriding arbitrary config values, e.g.
/// `O5__DATABASE__MAX_CONNECTIONS=16`.
pub const ENV_PREFIX: &str = "O5";

/// Load the config from the given toml files and the process environment.
///
/// Files are merged in order, later files override earlier ones. Environment
/// variables take precedence over all files.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_env(paths, std::env::vars().collect())
}

/// Like [`load`], but reads overrides from `env` instead of the process
/// environment.
pub fn load_with_env(
    paths: &[impl AsRef<Path>],
    env: HashMap<String, String>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .source(Some(env.clone())),
        )
        .set_override_option("database.url", env.get("DATABASE_URL").cloned())?
        .set_override_option("http.port", env.get("PORT").cloned())?
        .set_override_option(
            "http.standalone_server",
            env.contains_key("VERCEL").then_some(false),
        )?;

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Whether `serve` binds its own listener. Disabled on managed platforms
    /// which invoke the router directly.
    pub standalone_server: bool,
    /// Header carrying the original client address when running behind a
    /// reverse proxy.
    pub real_ip_header: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    /// Url of the contact endpoint used by the submission client.
    pub endpoint: Url,
}
