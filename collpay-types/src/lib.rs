//! # Collpay Types
//!
//! Wire and domain types for the Collpay payment API. No IO lives here:
//! everything operates on bytes already read from the network.
//!
//! - `envelope` - the `{success, message, data}` wrapper on every response
//! - `coerce` - string-typed amounts, rates and dates to native values
//! - `domain/` - typed results (exchange rate, transaction, status)
//! - `dto` - request payloads
//! - `error` - decode and input errors

pub mod coerce;
pub mod domain;
pub mod dto;
pub mod envelope;
pub mod error;

pub use domain::{ExchangeRate, PAYMENT_EVENT, Transaction, TransactionData, TransactionStatus};
pub use dto::{Amount, TRANSACTION_TYPE, TransactionInput};
pub use envelope::Envelope;
pub use error::{DecodeError, InputError};
