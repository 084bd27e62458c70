//! Client for the BlazeVerify email verification API.
//!
//! ```rust,no_run
//! use blazeverify::{Config, VerifyOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), blazeverify::Error> {
//!     let config = Config::new("live_...");
//!
//!     let verification = blazeverify::verify(&config, "john@example.com", VerifyOptions::default()).await?;
//!     println!("{:?}", verification.state());
//!
//!     let account = blazeverify::account(&config).await?;
//!     println!("{:?}", account.available_credits());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;

pub use client::{ApiResponse, Client, VerifyOptions};
pub use config::Config;
pub use error::{ApiError, ApiErrorKind, Error, Result};
pub use resources::{Account, BatchStatus, Verification};

/// Verifies a single email address with a one-off client.
#[tracing::instrument(skip(config))]
pub async fn verify(config: &Config, email: &str, options: VerifyOptions) -> Result<Verification> {
    Client::new(config.clone())?.verify(email, options).await
}

/// Fetches the account tied to the configured API key.
#[tracing::instrument(skip(config))]
pub async fn account(config: &Config) -> Result<Account> {
    Client::new(config.clone())?.account().await
}

/// Fetches the status of a previously created batch.
#[tracing::instrument(skip(config))]
pub async fn batch_status(config: &Config, id: &str, partial: bool) -> Result<BatchStatus> {
    Client::new(config.clone())?.batch_status(id, partial).await
}
