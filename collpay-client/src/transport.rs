//! One HTTP round trip per call, with the API's auth and content headers.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode, Url};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ClientError;

/// Header carrying the merchant's public key.
pub const AUTH_HEADER: &str = "x-auth";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_ACCEPT: &str = "application/json";

/// Sends requests to the configured API base URL.
///
/// Holds no per-call state; clones share the underlying connection pool.
#[derive(Clone)]
pub struct Transport {
    config: Config,
    http: Client,
    timeout: Option<Duration>,
}

impl Transport {
    pub fn new(config: Config) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Uses a caller-supplied `reqwest` client (proxies, TLS roots, ...).
    pub fn with_client(config: Config, http: Client) -> Self {
        Self {
            config,
            http,
            timeout: None,
        }
    }

    /// Sets a timeout applied to every request. None by default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the configuration requests are sent with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Resolves path segments against the base URL, percent-encoding each.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.config.base().clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Internal("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends one request and returns the raw body of a `200 OK` response.
    ///
    /// `form`, when given, is sent URL-encoded in the order supplied. Any
    /// status other than exactly 200 is an error.
    pub async fn send(
        &self,
        method: Method,
        segments: &[&str],
        form: Option<&[(&str, String)]>,
    ) -> Result<Vec<u8>, ClientError> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "Sending Collpay request");

        let mut req = self
            .http
            .request(method.clone(), url.clone())
            .header(AUTH_HEADER, self.config.auth_header().clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, JSON_ACCEPT);
        if let Some(form) = form {
            req = req.form(form);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "Collpay request failed");
            ClientError::Network(e)
        })?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_else(|e| {
                debug!(%method, %url, error = %e, "Failed to read error response body");
                String::new()
            });
            warn!(%method, %url, status = status.as_u16(), "Unexpected HTTP status");
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        debug!(%method, %url, bytes = body.len(), "Received Collpay response");
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> Transport {
        Transport::new(Config::with_host("key", "http://localhost:8000/api", "v1").unwrap())
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let url = transport().endpoint(&["exchange-rate"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/exchange-rate");
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let url = transport().endpoint(&["transactions", "a/b c"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/transactions/a%2Fb%20c"
        );
    }

    #[test]
    fn test_timeout_is_opt_in() {
        assert_eq!(transport().timeout(), None);
        let t = transport().with_timeout(Duration::from_secs(5));
        assert_eq!(t.timeout(), Some(Duration::from_secs(5)));
    }
}
