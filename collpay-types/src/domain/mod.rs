//! Typed results returned by the Collpay API.

pub mod rate;
pub mod status;
pub mod transaction;

pub use rate::ExchangeRate;
pub use status::TransactionStatus;
pub use transaction::{PAYMENT_EVENT, Transaction, TransactionData};
