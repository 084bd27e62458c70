use anyhow::{Context, Result};
use blazeverify::{Config, VerifyOptions};
use clap::Parser;
use serde::Serialize;

/// blazeverify - BlazeVerify email verification client
///
/// Verify email addresses and inspect your account from the command line.
///
/// Examples:
///   blazeverify verify john@example.com
///   blazeverify account
#[derive(Parser, Debug)]
#[command(author, version = env!("BLAZEVERIFY_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API key (also via BLAZEVERIFY_API_KEY)
    #[arg(
        long = "api-key",
        env = "BLAZEVERIFY_API_KEY",
        hide_env_values = true,
        value_name = "KEY",
        global = true
    )]
    api_key: Option<String>,

    /// API base URL (defaults to https://api.blazeverify.com/v1)
    #[arg(
        long = "api-url",
        env = "BLAZEVERIFY_API_URL",
        value_name = "URL",
        global = true
    )]
    api_url: Option<String>,

    /// Retries after a timeout, connection failure or conflict
    #[arg(
        long = "max-network-retries",
        value_name = "N",
        default_value_t = blazeverify::config::DEFAULT_MAX_NETWORK_RETRIES,
        global = true
    )]
    max_network_retries: u32,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Verify a single email address
    Verify(VerifyArgs),

    /// Show account credits and status
    Account,

    /// Show the status of a batch verification
    BatchStatus(BatchStatusArgs),
}

#[derive(clap::Args, Debug)]
struct VerifyArgs {
    /// The email address to verify
    #[arg(value_name = "EMAIL")]
    email: String,

    /// Run the SMTP check
    #[arg(long, value_name = "BOOL")]
    smtp: Option<bool>,

    /// Run the accept-all check
    #[arg(long = "accept-all", value_name = "BOOL")]
    accept_all: Option<bool>,

    /// Seconds the server may spend before giving up
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u32>,
}

#[derive(clap::Args, Debug)]
struct BatchStatusArgs {
    /// The batch id returned when the batch was created
    #[arg(value_name = "ID")]
    id: String,

    /// Return results before the whole batch has finished
    #[arg(long)]
    partial: bool,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let api_key = self
            .api_key
            .clone()
            .context("An API key is required. Pass --api-key or set BLAZEVERIFY_API_KEY.")?;

        let mut config = Config::new(api_key).with_max_network_retries(self.max_network_retries);
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url.clone());
        }
        Ok(config)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = cli.config()?;

    match cli.command {
        Commands::Verify(args) => {
            let options = VerifyOptions {
                smtp: args.smtp,
                accept_all: args.accept_all,
                timeout: args.timeout,
            };
            let verification = blazeverify::verify(&config, &args.email, options).await?;
            print_json(&verification)?
        }
        Commands::Account => {
            let account = blazeverify::account(&config).await?;
            print_json(&account)?
        }
        Commands::BatchStatus(args) => {
            let status = blazeverify::batch_status(&config, &args.id, args.partial).await?;
            print_json(&status)?
        }
    }
    Ok(())
}
