mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use nimbus_cloud::Credential;
use nimbus_cloud_aws::{Ec2, S3};
use nimbus_config::NimbusConfig;
use std::path::PathBuf;

/// Consulted after `--region` / `AWS_REGION`, before the configuration file
const DEFAULT_REGION_VAR: &str = "AWS_DEFAULT_REGION";

#[derive(Parser)]
#[command(name = "nimbus")]
#[command(about = "Inspect EC2 instances and elastic IPs, move objects in and out of S3", long_about = None)]
struct Cli {
    /// Access key id
    #[arg(long, env = "AWS_ACCESS_KEY_ID", global = true, hide_env_values = true)]
    access_key: Option<String>,

    /// Secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", global = true, hide_env_values = true)]
    secret_key: Option<String>,

    /// Region (falls back to AWS_DEFAULT_REGION, then the configuration file)
    #[arg(long, env = "AWS_REGION", global = true)]
    region: Option<String>,

    /// Bucket for get / put (falls back to the configuration file)
    #[arg(long, env = "NIMBUS_BUCKET", global = true)]
    bucket: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List instances
    Instances {
        /// Only running instances
        #[arg(short, long)]
        running: bool,
    },
    /// List reserved instances with their remaining term
    Reserved {
        /// Only active reservations
        #[arg(short, long)]
        active: bool,
    },
    /// List elastic IPs
    Eips {
        /// Only addresses not bound to a network interface
        #[arg(short, long)]
        unattached: bool,
    },
    /// Show the elastic IP bound to each private address of a network interface
    Interface {
        /// Network interface id (eni-...)
        id: String,
    },
    /// Download an object to a local file
    Get {
        /// Object key
        key: String,
        /// Local destination
        path: PathBuf,
    },
    /// Upload a local file as an object
    Put {
        /// Local source
        path: PathBuf,
        /// Object key
        key: String,
    },
    /// Show version information
    Version,
}

impl Cli {
    fn credential(&self, config: &NimbusConfig) -> anyhow::Result<Credential> {
        let access_key = self
            .access_key
            .clone()
            .context("No access key: pass --access-key or set AWS_ACCESS_KEY_ID")?;
        let secret_key = self
            .secret_key
            .clone()
            .context("No secret key: pass --secret-key or set AWS_SECRET_ACCESS_KEY")?;
        let region = self
            .region
            .clone()
            .or_else(|| std::env::var(DEFAULT_REGION_VAR).ok())
            .or_else(|| config.region.clone())
            .context(
                "No region: pass --region, set AWS_REGION / AWS_DEFAULT_REGION or add `region` to nimbus.yaml",
            )?;

        Ok(Credential::new(access_key, secret_key, region))
    }

    fn bucket(&self, config: &NimbusConfig) -> anyhow::Result<String> {
        self.bucket
            .clone()
            .or_else(|| config.bucket.clone())
            .context("No bucket: pass --bucket, set NIMBUS_BUCKET or add `bucket` to nimbus.yaml")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    // version needs no credentials
    if matches!(cli.command, Commands::Version) {
        println!("nimbus {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = NimbusConfig::load().context("Failed to load configuration file")?;
    let credential = cli.credential(&config)?;
    tracing::debug!("Using credential {:?}", credential);

    match &cli.command {
        Commands::Instances { running } => {
            commands::instances::handle(&Ec2::new(&credential), *running).await?;
        }
        Commands::Reserved { active } => {
            commands::reserved::handle(&Ec2::new(&credential), *active).await?;
        }
        Commands::Eips { unattached } => {
            commands::eips::handle(&Ec2::new(&credential), *unattached).await?;
        }
        Commands::Interface { id } => {
            commands::interface::handle(&Ec2::new(&credential), id).await?;
        }
        Commands::Get { key, path } => {
            let s3 = S3::new(&credential, cli.bucket(&config)?);
            commands::storage::handle_get(&s3, key, path).await?;
        }
        Commands::Put { path, key } => {
            let s3 = S3::new(&credential, cli.bucket(&config)?);
            commands::storage::handle_put(&s3, path, key).await?;
        }
        Commands::Version => {
            unreachable!("Version is handled before credential loading");
        }
    }

    Ok(())
}
