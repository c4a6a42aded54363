//! The three Collpay operations.

use std::time::Duration;

use collpay_types::{Envelope, ExchangeRate, Transaction, TransactionInput};
use reqwest::{Client, Method};
use tracing::{instrument, warn};

use crate::config::Config;
use crate::error::ClientError;
use crate::transport::Transport;

/// Collpay API client.
///
/// Cheap to clone and safe to share between tasks: the configuration is
/// read-only and no state is kept between calls.
#[derive(Clone)]
pub struct CollpayClient {
    transport: Transport,
}

impl CollpayClient {
    /// Creates a new client.
    pub fn new(config: Config) -> Self {
        Self {
            transport: Transport::new(config),
        }
    }

    /// Creates a client on top of an existing `reqwest` client.
    pub fn with_http_client(config: Config, http: Client) -> Self {
        Self {
            transport: Transport::with_client(config, http),
        }
    }

    /// Sets a timeout for every request made by this client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.with_timeout(timeout);
        self
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &Config {
        self.transport.config()
    }

    /// Gets the exchange rate between two currencies.
    ///
    /// Currency codes are sent as given; the API expects uppercase codes.
    #[instrument(skip(self), err)]
    pub async fn get_exchange_rate(
        &self,
        from: &str,
        to: &str,
    ) -> Result<ExchangeRate, ClientError> {
        let form = [("from", from.to_string()), ("to", to.to_string())];
        let envelope = self
            .request(Method::POST, &["exchange-rate"], Some(form.as_slice()))
            .await?;
        Ok(ExchangeRate::from_envelope(&envelope)?)
    }

    /// Creates a payment transaction.
    ///
    /// Invalid input fails before any request is sent. If the API refuses the
    /// transaction, the result has `success == false` and only `message` set.
    #[instrument(skip_all, err, fields(order_currency = %input.order_currency, payment_currency = %input.payment_currency))]
    pub async fn create_transaction(
        &self,
        input: &TransactionInput,
    ) -> Result<Transaction, ClientError> {
        let form = input.to_form()?;
        let envelope = self
            .request(Method::POST, &["transactions"], Some(form.as_slice()))
            .await?;
        Ok(Transaction::from_envelope(&envelope)?)
    }

    /// Gets a transaction by ID.
    ///
    /// The ID is sent as a single path segment. Blank IDs and the dot
    /// segments `.` and `..` are rejected before any request is sent.
    #[instrument(skip(self), err)]
    pub async fn get_transaction(&self, id: &str) -> Result<Transaction, ClientError> {
        if id.trim().is_empty() {
            return Err(ClientError::InvalidArgument(
                "transaction id must not be empty".into(),
            ));
        }
        if matches!(id, "." | "..") {
            return Err(ClientError::InvalidArgument(format!(
                "transaction id {id:?} is not a valid path segment"
            )));
        }
        let envelope = self.request(Method::GET, &["transactions", id], None).await?;
        Ok(Transaction::from_envelope(&envelope)?)
    }

    async fn request(
        &self,
        method: Method,
        segments: &[&str],
        form: Option<&[(&str, String)]>,
    ) -> Result<Envelope, ClientError> {
        let body = self.transport.send(method, segments, form).await?;
        let envelope = Envelope::decode(&body)?;
        if !envelope.success {
            warn!(message = %envelope.message, "Collpay rejected the request");
        }
        Ok(envelope)
    }
}
