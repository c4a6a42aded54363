//! Lifecycle states of a payment transaction.

use serde::{Deserialize, Serialize};

/// Status reported by the API for a transaction.
///
/// The API does not promise a closed set, so names outside the known ones
/// are kept verbatim in [`TransactionStatus::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    /// Waiting for the payer's funds
    Processing,
    /// Payment seen, merchant notified
    Notified,
    /// Payment confirmed on chain
    Confirmed,
    /// Payment window closed without payment
    Expired,
    Completed,
    Failed,
    Rejected,
    Blocked,
    Refunded,
    Voided,
    Unknown(String),
}

impl TransactionStatus {
    /// Every status name the API documents.
    pub const KNOWN: [TransactionStatus; 10] = [
        Self::Processing,
        Self::Notified,
        Self::Confirmed,
        Self::Expired,
        Self::Completed,
        Self::Failed,
        Self::Rejected,
        Self::Blocked,
        Self::Refunded,
        Self::Voided,
    ];

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl AsRef<str> for TransactionStatus {
    fn as_ref(&self) -> &str {
        match self {
            Self::Processing => "Processing",
            Self::Notified => "Notified",
            Self::Confirmed => "Confirmed",
            Self::Expired => "Expired",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Rejected => "Rejected",
            Self::Blocked => "Blocked",
            Self::Refunded => "Refunded",
            Self::Voided => "Voided",
            Self::Unknown(name) => name,
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl From<&str> for TransactionStatus {
    /// Matches the API's status names ignoring ASCII case.
    fn from(s: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|status| status.as_ref().eq_ignore_ascii_case(s))
            .unwrap_or_else(|| Self::Unknown(s.to_string()))
    }
}

impl From<String> for TransactionStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Unknown(name) => name,
            known => known.as_ref().to_string(),
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
