//! Payment transaction model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::TransactionStatus;
use crate::coerce::{self, lenient_string};
use crate::envelope::Envelope;
use crate::error::DecodeError;

/// Webhook event name sent when a payment is received.
pub const PAYMENT_EVENT: &str = "payment";

/// Transaction exactly as the API sends it: every field as text.
///
/// This is the `data` payload of the transaction endpoints and the body of
/// IPN callbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransactionData {
    #[serde(rename = "transaction_id", deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub transaction_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub order_currency: String,
    #[serde(deserialize_with = "lenient_string")]
    pub order_amount: String,
    #[serde(deserialize_with = "lenient_string")]
    pub payment_currency: String,
    #[serde(deserialize_with = "lenient_string")]
    pub payment_amount: String,
    #[serde(deserialize_with = "lenient_string")]
    pub payer_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub payer_email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub payer_phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub payer_address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub crypto_address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub exchange_rate: String,
    #[serde(deserialize_with = "lenient_string")]
    pub expiry_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub hosted_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ipn_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub success_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub cancel_url: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ipn_secret: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status_date: String,
    #[serde(rename = "event", deserialize_with = "lenient_string")]
    pub webhook_event: String,
    #[serde(deserialize_with = "lenient_string")]
    pub cart: String,
    #[serde(deserialize_with = "lenient_string")]
    pub webhook_data: String,
}

/// A payment transaction with its numeric and date fields parsed.
///
/// When `success` is false only `message` is meaningful; every other field
/// holds its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub transaction_type: String,
    pub order_currency: String,
    pub order_amount: f64,
    pub payment_currency: String,
    pub payment_amount: f64,
    pub payer_name: String,
    pub payer_email: String,
    pub payer_phone: String,
    pub payer_address: String,
    /// Address the payer sends funds to
    pub crypto_address: String,
    /// Rate used to derive `payment_amount` from `order_amount`
    pub exchange_rate: f64,
    pub expiry_date: Option<DateTime<Utc>>,
    /// Payment page hosted by Collpay
    pub hosted_url: String,
    pub ipn_url: String,
    pub success_url: String,
    pub cancel_url: String,
    pub ipn_secret: String,
    pub status: Option<TransactionStatus>,
    pub status_date: Option<DateTime<Utc>>,
    pub webhook_event: String,
    pub cart: String,
    pub webhook_data: String,
    pub success: bool,
    pub message: String,
}

impl Transaction {
    /// A result carrying only the API's failure message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Default::default()
        }
    }

    /// Builds the result from a decoded envelope.
    ///
    /// On a failed envelope nothing in `data` is read. On success all of
    /// `order_amount`, `payment_amount` and `exchange_rate` must parse, or the
    /// whole decode fails.
    pub fn from_envelope(envelope: &Envelope) -> Result<Self, DecodeError> {
        if !envelope.success {
            return Ok(Self::failed(envelope.message.clone()));
        }
        let data: TransactionData = envelope.data_as()?;
        Self::from_data(data, envelope.message.clone())
    }

    /// Decodes an IPN callback body.
    ///
    /// Accepts either a full envelope or a bare transaction object.
    pub fn from_notification(body: &[u8]) -> Result<Self, DecodeError> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if value.get("success").is_some_and(serde_json::Value::is_boolean) {
            let envelope: Envelope = serde_json::from_value(value)?;
            return Self::from_envelope(&envelope);
        }
        let data: TransactionData = serde_json::from_value(value)?;
        Self::from_data(data, String::new())
    }

    /// Coerces the wire fields of a successful response.
    pub fn from_data(data: TransactionData, message: String) -> Result<Self, DecodeError> {
        let order_amount = coerce::parse_amount("order_amount", &data.order_amount)?;
        let payment_amount = coerce::parse_amount("payment_amount", &data.payment_amount)?;
        let exchange_rate = coerce::parse_amount("exchange_rate", &data.exchange_rate)?;
        let expiry_date = coerce::parse_timestamp("expiry_date", &data.expiry_date)?;
        let status_date = coerce::parse_timestamp("status_date", &data.status_date)?;
        let status = match data.status.as_str() {
            "" => None,
            s => Some(TransactionStatus::from(s)),
        };

        Ok(Self {
            id: data.id,
            transaction_type: data.transaction_type,
            order_currency: data.order_currency,
            order_amount,
            payment_currency: data.payment_currency,
            payment_amount,
            payer_name: data.payer_name,
            payer_email: data.payer_email,
            payer_phone: data.payer_phone,
            payer_address: data.payer_address,
            crypto_address: data.crypto_address,
            exchange_rate,
            expiry_date,
            hosted_url: data.hosted_url,
            ipn_url: data.ipn_url,
            success_url: data.success_url,
            cancel_url: data.cancel_url,
            ipn_secret: data.ipn_secret,
            status,
            status_date,
            webhook_event: data.webhook_event,
            cart: data.cart,
            webhook_data: data.webhook_data,
            success: true,
            message,
        })
    }

    /// Returns true if this transaction arrived as a payment webhook.
    pub fn is_payment_event(&self) -> bool {
        self.webhook_event == PAYMENT_EVENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_data() -> serde_json::Value {
        json!({
            "transaction_id": "tx_123",
            "type": "collpay",
            "order_currency": "USD",
            "order_amount": "100",
            "payment_currency": "BTC",
            "payment_amount": "0.00616",
            "payer_name": "Alice",
            "payer_email": "alice@example.com",
            "payer_phone": null,
            "crypto_address": "bc1qexample",
            "exchange_rate": "0.0000616",
            "expiry_date": "2021-06-01T12:30:00Z",
            "hosted_url": "https://pay.example/tx_123",
            "status": "Processing",
            "event": "payment",
            "cart": {"sku": "A1"}
        })
    }

    fn envelope(success: bool, message: &str, data: serde_json::Value) -> Envelope {
        Envelope {
            success,
            message: message.to_string(),
            data,
        }
    }

    #[test]
    fn test_successful_transaction_is_coerced() {
        let tx = Transaction::from_envelope(&envelope(true, "created", sample_data())).unwrap();

        assert!(tx.success);
        assert_eq!(tx.message, "created");
        assert_eq!(tx.id, "tx_123");
        assert_eq!(tx.transaction_type, "collpay");
        assert_eq!(tx.order_amount, 100.0);
        assert_eq!(tx.payment_amount, 0.00616);
        assert_eq!(tx.exchange_rate, 0.0000616);
        assert_eq!(tx.payer_phone, "");
        assert_eq!(tx.status, Some(TransactionStatus::Processing));
        assert_eq!(
            tx.expiry_date,
            Some(Utc.with_ymd_and_hms(2021, 6, 1, 12, 30, 0).unwrap())
        );
        assert_eq!(tx.status_date, None);
        assert_eq!(tx.cart, r#"{"sku":"A1"}"#);
        assert!(tx.is_payment_event());
    }

    #[test]
    fn test_failed_envelope_skips_coercion() {
        let tx = Transaction::from_envelope(&envelope(false, "bad currency", json!(null))).unwrap();
        assert_eq!(tx, Transaction::failed("bad currency"));
        assert_eq!(tx.order_amount, 0.0);
        assert!(tx.status.is_none());
    }

    #[test]
    fn test_unparsable_amount_fails_whole_decode() {
        let mut data = sample_data();
        data["order_amount"] = json!("one hundred");
        assert!(matches!(
            Transaction::from_envelope(&envelope(true, "", data)),
            Err(DecodeError::InvalidAmount { field: "order_amount", .. })
        ));
    }

    #[test]
    fn test_missing_amount_fails_on_success() {
        let mut data = sample_data();
        data.as_object_mut().unwrap().remove("exchange_rate");
        assert!(matches!(
            Transaction::from_envelope(&envelope(true, "", data)),
            Err(DecodeError::InvalidAmount { field: "exchange_rate", .. })
        ));
    }

    #[test]
    fn test_numeric_amounts_are_accepted() {
        let mut data = sample_data();
        data["order_amount"] = json!(250.5);
        let tx = Transaction::from_envelope(&envelope(true, "", data)).unwrap();
        assert_eq!(tx.order_amount, 250.5);
    }

    #[test]
    fn test_unknown_status_does_not_fail_decode() {
        let mut data = sample_data();
        data["status"] = json!("Pending");
        let tx = Transaction::from_envelope(&envelope(true, "", data)).unwrap();
        assert_eq!(tx.status, Some(TransactionStatus::Unknown("Pending".into())));
        assert_eq!(tx.order_amount, 100.0);
    }

    #[test]
    fn test_notification_bare_object() {
        let body = serde_json::to_vec(&sample_data()).unwrap();
        let tx = Transaction::from_notification(&body).unwrap();
        assert!(tx.success);
        assert_eq!(tx.id, "tx_123");
        assert_eq!(tx.message, "");
    }

    #[test]
    fn test_notification_enveloped() {
        let body = serde_json::to_vec(&json!({
            "success": true,
            "message": "ipn",
            "data": sample_data(),
        }))
        .unwrap();
        let tx = Transaction::from_notification(&body).unwrap();
        assert_eq!(tx.message, "ipn");
        assert_eq!(tx.status, Some(TransactionStatus::Processing));
    }
}
