//! # Collpay Client SDK
//!
//! A typed Rust client for the Collpay crypto payment API.
//!
//! ```no_run
//! use collpay_client::{CollpayClient, Config, Environment, TransactionInput};
//!
//! # async fn run() -> Result<(), collpay_client::ClientError> {
//! let config = Config::configure("pk_live_xxx", Environment::Sandbox, "v1")?;
//! let client = CollpayClient::new(config);
//!
//! let rate = client.get_exchange_rate("USD", "BTC").await?;
//! println!("1 USD = {:?} BTC", rate.rate);
//!
//! let input = TransactionInput::new("USD", 25.0, "BTC").with_payer_email("alice@example.com");
//! let tx = client.create_transaction(&input).await?;
//! if tx.success {
//!     println!("pay at {}", tx.hosted_url);
//! } else {
//!     println!("refused: {}", tx.message);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
mod error;
pub mod transport;

pub use client::CollpayClient;
pub use config::{Config, DEFAULT_API_VERSION, Environment};
pub use error::ClientError;

pub use collpay_types::{
    Amount, ExchangeRate, PAYMENT_EVENT, Transaction, TransactionInput, TransactionStatus,
};
