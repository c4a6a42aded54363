//! Request payloads sent to the API.

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Fixed value of the `type` form field on transaction creation.
pub const TRANSACTION_TYPE: &str = "collpay";

/// Order amount as supplied by the merchant.
///
/// Numbers are sent as their shortest decimal text; text is sent as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    fn is_missing(&self) -> bool {
        matches!(self, Amount::Text(s) if s.trim().is_empty())
    }

    /// Renders the amount as a form value.
    pub fn to_form_value(&self) -> Result<String, InputError> {
        match self {
            Amount::Number(n) if !n.is_finite() => Err(InputError::NonFiniteAmount(*n)),
            Amount::Number(n) => Ok(n.to_string()),
            Amount::Text(s) => Ok(s.clone()),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Text(String::new())
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Amount::Text(value)
    }
}

/// Merchant-supplied fields for creating a transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Currency the payer pays in, e.g. `BTC`
    pub payment_currency: String,
    /// Currency the order is priced in, e.g. `USD`
    pub order_currency: String,
    pub order_amount: Amount,
    pub payer_name: String,
    pub payer_email: String,
    pub payer_phone: String,
    pub payer_address: String,
    /// Callback for instant payment notifications
    pub ipn_url: String,
    pub ipn_secret: String,
    pub success_url: String,
    pub cancel_url: String,
    pub cart: String,
    pub webhook_data: String,
}

impl TransactionInput {
    /// Creates an input with the required order fields set.
    pub fn new(
        order_currency: impl Into<String>,
        order_amount: impl Into<Amount>,
        payment_currency: impl Into<String>,
    ) -> Self {
        Self {
            order_currency: order_currency.into(),
            order_amount: order_amount.into(),
            payment_currency: payment_currency.into(),
            ..Default::default()
        }
    }

    pub fn with_payer_name(mut self, name: impl Into<String>) -> Self {
        self.payer_name = name.into();
        self
    }

    pub fn with_payer_email(mut self, email: impl Into<String>) -> Self {
        self.payer_email = email.into();
        self
    }

    pub fn with_payer_phone(mut self, phone: impl Into<String>) -> Self {
        self.payer_phone = phone.into();
        self
    }

    pub fn with_payer_address(mut self, address: impl Into<String>) -> Self {
        self.payer_address = address.into();
        self
    }

    /// Sets the IPN callback URL and the secret echoed back in callbacks.
    pub fn with_ipn(mut self, url: impl Into<String>, secret: impl Into<String>) -> Self {
        self.ipn_url = url.into();
        self.ipn_secret = secret.into();
        self
    }

    pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = url.into();
        self
    }

    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = url.into();
        self
    }

    pub fn with_cart(mut self, cart: impl Into<String>) -> Self {
        self.cart = cart.into();
        self
    }

    pub fn with_webhook_data(mut self, data: impl Into<String>) -> Self {
        self.webhook_data = data.into();
        self
    }

    /// Checks that the order fields are present and the amount is usable.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.order_currency.trim().is_empty() {
            return Err(InputError::MissingField("order_currency"));
        }
        if self.payment_currency.trim().is_empty() {
            return Err(InputError::MissingField("payment_currency"));
        }
        if self.order_amount.is_missing() {
            return Err(InputError::MissingField("order_amount"));
        }
        self.order_amount.to_form_value().map(|_| ())
    }

    /// Form body for `POST /transactions`, in wire order.
    pub fn to_form(&self) -> Result<Vec<(&'static str, String)>, InputError> {
        self.validate()?;
        Ok(vec![
            ("type", TRANSACTION_TYPE.to_string()),
            ("payment_currency", self.payment_currency.clone()),
            ("order_currency", self.order_currency.clone()),
            ("order_amount", self.order_amount.to_form_value()?),
            ("payer_name", self.payer_name.clone()),
            ("payer_email", self.payer_email.clone()),
            ("payer_phone", self.payer_phone.clone()),
            ("payer_address", self.payer_address.clone()),
            ("ipn_url", self.ipn_url.clone()),
            ("ipn_secret", self.ipn_secret.clone()),
            ("success_url", self.success_url.clone()),
            ("cancel_url", self.cancel_url.clone()),
            ("cart", self.cart.clone()),
            ("webhook_data", self.webhook_data.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_order_and_fixed_type() {
        let input = TransactionInput::new("USD", 100.0, "BTC")
            .with_payer_email("alice@example.com")
            .with_ipn("https://shop.example/ipn", "s3cret");
        let form = input.to_form().unwrap();

        let keys: Vec<_> = form.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            [
                "type",
                "payment_currency",
                "order_currency",
                "order_amount",
                "payer_name",
                "payer_email",
                "payer_phone",
                "payer_address",
                "ipn_url",
                "ipn_secret",
                "success_url",
                "cancel_url",
                "cart",
                "webhook_data",
            ]
        );
        assert_eq!(form[0].1, "collpay");
        assert_eq!(form[3].1, "100");
        assert_eq!(form[5].1, "alice@example.com");
        assert_eq!(form[9].1, "s3cret");
    }

    #[test]
    fn test_amount_rendering() {
        assert_eq!(Amount::from(12.5).to_form_value().unwrap(), "12.5");
        assert_eq!(Amount::from(0.0000616).to_form_value().unwrap(), "0.0000616");
        assert_eq!(Amount::from("12.50").to_form_value().unwrap(), "12.50");
        assert!(matches!(
            Amount::from(f64::NAN).to_form_value(),
            Err(InputError::NonFiniteAmount(_))
        ));
    }

    #[test]
    fn test_validate_required_fields() {
        assert!(matches!(
            TransactionInput::default().validate(),
            Err(InputError::MissingField("order_currency"))
        ));
        assert!(matches!(
            TransactionInput::new("USD", 1.0, " ").validate(),
            Err(InputError::MissingField("payment_currency"))
        ));
        assert!(matches!(
            TransactionInput::new("USD", "", "BTC").validate(),
            Err(InputError::MissingField("order_amount"))
        ));
        assert!(TransactionInput::new("USD", "1", "BTC").validate().is_ok());
    }
}
