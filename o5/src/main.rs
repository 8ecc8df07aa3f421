use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use o5::commands::{check_config::check_config, serve::serve, submit::SubmitCommand};
use o5_utils::o5_version;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    let config = o5_config::load(&config_paths(cli.config)).context("Failed to load config")?;

    match cli.command {
        Command::Serve => serve(config).await?,
        Command::Submit(command) => command.invoke(config).await?,
        Command::CheckConfig { verbose, ping } => check_config(config, verbose, ping).await?,
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = o5_version())]
struct Cli {
    /// Additional config files, applied in order on top of the default config
    #[arg(
        long,
        global = true,
        env = "O5_CONFIG_PATHS",
        value_delimiter = ':'
    )]
    config: Vec<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the http server accepting contact form submissions
    #[command(aliases(["run", "start", "r", "s"]))]
    Serve,
    /// Validate a contact form and send it to the server
    #[command(aliases(["send"]))]
    Submit(SubmitCommand),
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
        /// Connect to the database and count the stored contact messages
        #[arg(short, long)]
        ping: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

/// The default config file is skipped when it does not exist, e.g. when the
/// binary runs outside of the repository.
fn config_paths(extra: Vec<PathBuf>) -> Vec<PathBuf> {
    let default = Path::new(o5_config::DEFAULT_CONFIG_PATH);
    default
        .exists()
        .then(|| default.to_owned())
        .into_iter()
        .chain(extra)
        .collect()
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn extra_config_files() {
        let cli = Cli::try_parse_from(["o5", "--config", "a.toml:b.toml", "check-config"]).unwrap();
        assert_eq!(cli.config, [PathBuf::from("a.toml"), PathBuf::from("b.toml")]);
    }
}
