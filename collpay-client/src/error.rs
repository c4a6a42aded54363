//! Error type for client operations.

use collpay_types::{DecodeError, InputError};

/// Everything that can go wrong in a client call.
///
/// An API-level refusal (`success: false` in the response) is not an error:
/// it comes back as a normal result whose `success` flag is false.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {status} - {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] DecodeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<InputError> for ClientError {
    fn from(err: InputError) -> Self {
        ClientError::InvalidArgument(err.to_string())
    }
}
