//! Exchange rate lookup result.

use serde::{Deserialize, Serialize};

use crate::coerce::{self, lenient_string};
use crate::envelope::Envelope;
use crate::error::DecodeError;

/// Result of an exchange rate lookup.
///
/// `rate` is `None` when the API reported failure or answered with an empty
/// rate; neither case is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub success: bool,
    pub message: String,
    pub rate: Option<f64>,
}

/// `data` payload of `POST /exchange-rate`.
#[derive(Debug, Deserialize)]
struct RateData {
    #[serde(default, deserialize_with = "lenient_string")]
    rate: String,
}

impl ExchangeRate {
    /// A result carrying only the API's failure message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            rate: None,
        }
    }

    /// Builds the result from a decoded envelope.
    ///
    /// The rate is only read when the envelope reports success.
    pub fn from_envelope(envelope: &Envelope) -> Result<Self, DecodeError> {
        if !envelope.success {
            return Ok(Self::failed(envelope.message.clone()));
        }
        let data: RateData = envelope.data_as()?;
        Ok(Self {
            success: true,
            message: envelope.message.clone(),
            rate: coerce::parse_optional_amount("rate", &data.rate)?,
        })
    }
}
