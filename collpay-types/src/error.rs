//! Error types for response decoding.

/// Failures while turning a response body into typed values.
///
/// Every variant means the server answered, but with something this SDK
/// cannot make sense of.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid amount in `{field}`: {value:?}")]
    InvalidAmount { field: &'static str, value: String },

    #[error("Invalid timestamp in `{field}`: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },
}

/// Merchant input rejected before any request is made.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Amount must be finite, got {0}")]
    NonFiniteAmount(f64),
}
