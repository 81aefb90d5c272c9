use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use service_config::{
    ConfigLoader, Configuration,
    configs::{
        AwsSecretStore, AwsSecretStoreConfig, ENV_PREFIX, SECRET_ID, SECRET_REGION, SecretStore,
        StaticSecretStore,
    },
};

/// Loads the service configuration once and reports what was resolved.
#[derive(Debug, Parser)]
#[command(name = "check-config", version)]
struct Args {
    /// Directory containing the `conf` file
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// Prefix for environment overrides
    #[arg(long, default_value = ENV_PREFIX)]
    env_prefix: String,

    /// Secret holding the database credentials
    #[arg(long, default_value = SECRET_ID)]
    secret_id: String,

    /// Read the secret JSON from this file instead of AWS Secrets Manager
    #[arg(long)]
    secret_file: Option<PathBuf>,
}

fn setup_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()) // reads RUST_LOG
        .with_target(false)
        .with_level(true)
        .try_init();
}

async fn load_configuration(args: &Args) -> anyhow::Result<Configuration> {
    let store: Box<dyn SecretStore> = match &args.secret_file {
        Some(path) => Box::new(StaticSecretStore::from_file(path)?),
        None => Box::new(AwsSecretStore::new(AwsSecretStoreConfig::from_env(SECRET_REGION)).await),
    };

    let config = ConfigLoader::new(store)
        .with_config_dir(&args.config_dir)
        .with_env_prefix(&args.env_prefix)
        .with_secret_id(&args.secret_id)
        .load()
        .await
        .context("Failed to load configs")?;

    Ok(config)
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    setup_logging();

    let args = Args::parse();

    match load_configuration(&args).await {
        Ok(config) => {
            info!("Configuration is valid");
            println!("listen:   {}", config.listen_address());
            println!("database: {}:{}/{}", config.db_host, config.db_port, config.db_name);
            println!("user:     {}", config.db_user);
        }
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
