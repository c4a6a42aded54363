//! Client configuration: credentials, environment and API version.

use reqwest::Url;
use reqwest::header::HeaderValue;

use crate::error::ClientError;

/// Base URL of the production API, before the version suffix.
pub const PRODUCTION_BASE_URL: &str = "http://localhost:8000/api/";

/// Base URL of the sandbox API, before the version suffix.
pub const SANDBOX_BASE_URL: &str = "https://collpay-dev.dev03.squaredbyte.com/api/";

/// Version used when none is given.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Deployment target of the remote API.
///
/// Parsing is permissive: only a recognized sandbox value selects
/// [`Environment::Sandbox`]; anything else falls back to production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    /// Numeric code of the production environment in the API's docs.
    pub const PRODUCTION_CODE: u32 = 1;
    /// Numeric code of the sandbox environment in the API's docs.
    pub const SANDBOX_CODE: u32 = 2;

    /// Base URL of this environment, before the version suffix.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

impl From<u32> for Environment {
    fn from(code: u32) -> Self {
        match code {
            Environment::SANDBOX_CODE => Environment::Sandbox,
            _ => Environment::Production,
        }
    }
}

impl From<&str> for Environment {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("sandbox") {
            return Environment::Sandbox;
        }
        match value.parse::<u32>() {
            Ok(code) => Environment::from(code),
            Err(_) => Environment::Production,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}

/// Validated client configuration.
///
/// The base URL is derived once, when the configuration is built, and never
/// changes afterwards. Build a new `Config` to point somewhere else.
#[derive(Clone)]
pub struct Config {
    public_key: String,
    environment: Environment,
    api_version: String,
    base_url: Url,
    auth: HeaderValue,
}

impl Config {
    /// Configures a client for one of the hosted environments.
    ///
    /// An empty `api_version` means [`DEFAULT_API_VERSION`].
    pub fn configure(
        public_key: &str,
        environment: Environment,
        api_version: &str,
    ) -> Result<Self, ClientError> {
        Self::build(public_key, environment, environment.base_url(), api_version)
    }

    /// Configures a production client with the default API version.
    pub fn new(public_key: &str) -> Result<Self, ClientError> {
        Self::configure(public_key, Environment::default(), "")
    }

    /// Configures a client against another API host, such as a self-hosted
    /// deployment or a local mock server.
    ///
    /// `host` is the URL prefix the version is appended to, e.g.
    /// `http://127.0.0.1:8000/api`.
    pub fn with_host(public_key: &str, host: &str, api_version: &str) -> Result<Self, ClientError> {
        let prefix = format!("{}/", host.trim_end_matches('/'));
        Self::build(public_key, Environment::Production, &prefix, api_version)
    }

    fn build(
        public_key: &str,
        environment: Environment,
        prefix: &str,
        api_version: &str,
    ) -> Result<Self, ClientError> {
        let public_key = public_key.trim();
        if public_key.is_empty() {
            return Err(ClientError::InvalidConfig(
                "public key must not be empty".into(),
            ));
        }
        let mut auth = HeaderValue::from_str(public_key).map_err(|_| {
            ClientError::InvalidConfig("public key is not a valid header value".into())
        })?;
        auth.set_sensitive(true);

        let api_version = match api_version.trim() {
            "" => DEFAULT_API_VERSION,
            v => v,
        };
        let raw = format!("{}{}", prefix, api_version);
        let base_url = Url::parse(&raw)
            .map_err(|e| ClientError::InvalidConfig(format!("invalid base URL {raw:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidConfig(format!(
                "base URL {raw:?} cannot carry a path"
            )));
        }

        Ok(Self {
            public_key: public_key.to_string(),
            environment,
            api_version: api_version.to_string(),
            base_url,
            auth,
        })
    }

    /// Returns the merchant public key sent in the `x-auth` header.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Returns the environment the base URL was derived from.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the API version appended to the base URL.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// The derived base URL, e.g. `https://.../api/v1`.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub(crate) fn base(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn auth_header(&self) -> &HeaderValue {
        &self.auth
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("public_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_public_key_is_rejected() {
        assert!(matches!(
            Config::configure("", Environment::Sandbox, "v1"),
            Err(ClientError::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::new("   "),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_defaults_to_production_v1() {
        let config = Config::new("xxx").unwrap();
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.api_version(), "v1");
        assert_eq!(config.base_url(), format!("{}v1", PRODUCTION_BASE_URL));
    }

    #[test]
    fn test_sandbox_base_url() {
        let config = Config::configure("xxx", Environment::Sandbox, "v2").unwrap();
        assert_eq!(
            config.base_url(),
            "https://collpay-dev.dev03.squaredbyte.com/api/v2"
        );
    }

    #[test]
    fn test_environment_parsing_is_permissive() {
        assert_eq!(Environment::from("sandbox"), Environment::Sandbox);
        assert_eq!(Environment::from("SANDBOX"), Environment::Sandbox);
        assert_eq!(Environment::from("2"), Environment::Sandbox);
        assert_eq!(Environment::from("production"), Environment::Production);
        assert_eq!(Environment::from("staging"), Environment::Production);
        assert_eq!(Environment::from(""), Environment::Production);
        assert_eq!(Environment::from(7u32), Environment::Production);
    }

    #[test]
    fn test_with_host_trims_trailing_slash() {
        let config = Config::with_host("xxx", "http://127.0.0.1:9000/api/", "").unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:9000/api/v1");
    }

    #[test]
    fn test_with_host_rejects_garbage() {
        assert!(matches!(
            Config::with_host("xxx", "not a url", "v1"),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_public_key_not_in_debug_output() {
        let config = Config::new("super-secret-key").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_public_key_with_newline_is_rejected() {
        assert!(matches!(
            Config::new("abc\ndef"),
            Err(ClientError::InvalidConfig(_))
        ));
    }
}
