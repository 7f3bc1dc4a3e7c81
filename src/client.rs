//! ZeroBounce async client implementation.

use crate::{CreditBalanceResult, EmailValidationResult, Error, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const BASE_URL: &str = "https://api.zerobounce.net/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
const USER_AGENT_VALUE: &str = concat!("zerobounce-client-rs/", env!("CARGO_PKG_VERSION"));

/// Environment variable read by [`Client::from_env`] for the API key.
pub const API_KEY_ENV: &str = "ZEROBOUNCE_API_KEY";
/// Environment variable read by [`Client::from_env`] to override the base URL.
pub const BASE_URL_ENV: &str = "ZEROBOUNCE_BASE_URL";

/// REST endpoints exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Validate a single address.
    Validate,
    /// Validate a single address along with the sender's IP.
    ValidateWithIp,
    /// Look up the account's credit balance.
    Credits,
}

impl Endpoint {
    /// Path appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Validate => "/validate",
            Endpoint::ValidateWithIp => "/validatewithip",
            Endpoint::Credits => "/getcredits",
        }
    }

    fn operation(self) -> &'static str {
        match self {
            Endpoint::Validate => "validate_email",
            Endpoint::ValidateWithIp => "validate_email_with_ip",
            Endpoint::Credits => "get_credit_balance",
        }
    }
}

/// Async client for the ZeroBounce email validation API.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] for custom settings
/// like the base URL, timeout, or a proxy. The client is cheap to clone and
/// safe to share between tasks.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a client against the production endpoint with a 2 second timeout.
    ///
    /// # Examples
    /// ```no_run
    /// # use zerobounce_client::Client;
    /// # fn main() -> Result<(), zerobounce_client::Error> {
    /// let client = Client::new("my-api-key")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Create a client configured from `ZEROBOUNCE_API_KEY` and, if set,
    /// `ZEROBOUNCE_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env()?.build()
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validate an email address.
    ///
    /// A successful call only means the service answered. Check
    /// [`EmailValidationResult::is_valid`] and
    /// [`EmailValidationResult::error_message`] on the result.
    ///
    /// # Examples
    /// ```no_run
    /// # use zerobounce_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), zerobounce_client::Error> {
    /// let client = Client::new("my-api-key")?;
    /// let result = client.validate_email("flowerjill@aol.com").await?;
    /// println!("{}: {}", result.address, result.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn validate_email(&self, email: &str) -> Result<EmailValidationResult> {
        self.call(Endpoint::Validate, &[("email", email)]).await
    }

    /// Validate an email address, passing the IP address it was submitted from.
    pub async fn validate_email_with_ip(
        &self,
        email: &str,
        ip_address: &str,
    ) -> Result<EmailValidationResult> {
        self.call(
            Endpoint::ValidateWithIp,
            &[("email", email), ("ipaddress", ip_address)],
        )
        .await
    }

    /// Fetch the account's credit balance.
    ///
    /// # Examples
    /// ```no_run
    /// # use zerobounce_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), zerobounce_client::Error> {
    /// let client = Client::new("my-api-key")?;
    /// let balance = client.get_credit_balance().await?;
    /// if balance.credits_available()? {
    ///     println!("{} credits left", balance.credits);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_credit_balance(&self) -> Result<CreditBalanceResult> {
        self.call(Endpoint::Credits, &[]).await
    }

    /// Build the full request URL for an endpoint.
    ///
    /// The API key is always added as `apikey`, replacing any value passed in
    /// `params` or present on the base URL.
    pub fn build_url(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|source| Error::InvalidUrl {
            operation: endpoint.operation(),
            source,
        })?;

        let path = format!("{}{}", url.path().trim_end_matches('/'), endpoint.path());
        url.set_path(&path);

        let mut query: BTreeMap<String, String> = url.query_pairs().into_owned().collect();
        for (key, value) in params {
            query.insert((*key).to_string(), (*value).to_string());
        }
        query.insert("apikey".to_string(), self.api_key.clone());

        url.query_pairs_mut().clear().extend_pairs(&query);
        Ok(url)
    }

    /// Common GET request pattern.
    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let operation = endpoint.operation();
        let url = self.build_url(endpoint, params)?;

        debug!(operation, path = endpoint.path(), "Sending request");

        let request_error = |source| Error::Request { operation, source };
        let response = self.http.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(request_error)?;

        debug!(operation, status = status.as_u16(), len = body.len(), "Received response");

        if !status.is_success() {
            warn!(operation, status = status.as_u16(), "Service returned non-success status");
        }

        if body.is_empty() {
            warn!(operation, "Service returned an empty body");
            return Err(Error::EmptyResponse);
        }

        serde_json::from_slice(&body).map_err(|source| Error::ResponseParse {
            body: String::from_utf8_lossy(&body).into_owned(),
            source,
        })
    }
}

/// Builder for configuring a ZeroBounce client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Clone)]
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    proxy: Option<String>,
    http: Option<reqwest::Client>,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("proxy", &self.proxy)
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Production base URL (`https://api.zerobounce.net/v1`)
    /// - 2 second request timeout
    /// - No proxy
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT_VALUE.to_string(),
            proxy: None,
            http: None,
        }
    }

    /// Create a builder from `ZEROBOUNCE_API_KEY` and `ZEROBOUNCE_BASE_URL`.
    ///
    /// Returns [`Error::MissingApiKey`] if the key is unset or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)?;

        let mut builder = Self::new(api_key);
        if let Some(base_url) = std::env::var(BASE_URL_ENV).ok().filter(|url| !url.is_empty()) {
            builder = builder.base_url(base_url);
        }
        Ok(builder)
    }

    /// Override the base URL.
    ///
    /// Useful for testing against a mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout (default: 2 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:9050").
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Use a preconfigured `reqwest::Client`.
    ///
    /// The timeout, user agent and proxy settings of this builder are then
    /// ignored in favor of the ones baked into `http`.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the client.
    ///
    /// No network request is made.
    pub fn build(self) -> Result<Client> {
        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder()
                    .timeout(self.timeout)
                    .user_agent(self.user_agent);

                if let Some(proxy_url) = &self.proxy {
                    builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
                }

                builder.build()?
            }
        };

        Ok(Client {
            http,
            api_key: self.api_key,
            base_url: self.base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> Client {
        Client::builder("secret-key").base_url(base_url).build().unwrap()
    }

    fn query(url: &Url) -> BTreeMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn appends_endpoint_to_base_path() {
        let url = client(BASE_URL).build_url(Endpoint::Credits, &[]).unwrap();
        assert_eq!(url.path(), "/v1/getcredits");
        assert_eq!(url.host_str(), Some("api.zerobounce.net"));
    }

    #[test]
    fn handles_bare_host_and_trailing_slash() {
        let c = client("http://127.0.0.1:8080");
        let url = c.build_url(Endpoint::Validate, &[]).unwrap();
        assert_eq!(url.path(), "/validate");

        let c = client("http://127.0.0.1:8080/v1/");
        let url = c.build_url(Endpoint::ValidateWithIp, &[]).unwrap();
        assert_eq!(url.path(), "/v1/validatewithip");
    }

    #[test]
    fn api_key_overrides_caller_value() {
        let c = client("http://localhost/?apikey=stale&region=eu");
        let url = c
            .build_url(Endpoint::Validate, &[("apikey", "forged"), ("email", "a@b.c")])
            .unwrap();
        let q = query(&url);
        assert_eq!(q["apikey"], "secret-key");
        assert_eq!(q["email"], "a@b.c");
        assert_eq!(q["region"], "eu");
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn escapes_query_values() {
        let url = client("http://localhost")
            .build_url(Endpoint::Validate, &[("email", "a+b c&d@example.com")])
            .unwrap();
        assert_eq!(query(&url)["email"], "a+b c&d@example.com");
        assert!(!url.query().unwrap().contains("a+b c&d"));
    }

    #[test]
    fn malformed_base_url_is_an_error() {
        let err = client("not a url")
            .build_url(Endpoint::Credits, &[])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidUrl {
                operation: "get_credit_balance",
                ..
            }
        ));
    }

    #[test]
    fn debug_hides_api_key() {
        let rendered = format!("{:?}", client(BASE_URL));
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("api.zerobounce.net"));
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::Validate.path(), "/validate");
        assert_eq!(Endpoint::ValidateWithIp.path(), "/validatewithip");
        assert_eq!(Endpoint::Credits.path(), "/getcredits");
    }
}
