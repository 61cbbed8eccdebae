//! Client layer: authenticated requests, resource managers, and transport ↔ domain mapping.

mod calls;
#[cfg(test)]
mod fake;
mod messages;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::domain::{AccountSid, AuthToken, OutboundNumber, ValidationError};
use crate::transport::{DecodeError, JsonResponse, decode_error_message};

pub use calls::{Call, CallKind, CallsResource};
pub use messages::{Message, MessagesResource};

const DEFAULT_BASE_URL: &str = "https://api.callnowusa.com/v1";

/// Environment variable read by [`Client::from_env`] for the account sid.
pub const ACCOUNT_SID_ENV: &str = "CALLNOWUSA_ACCOUNT_SID";
/// Environment variable read by [`Client::from_env`] for the auth token.
pub const AUTH_TOKEN_ENV: &str = "CALLNOWUSA_AUTH_TOKEN";
/// Optional environment variable with the outbound number (defaults to `default`).
pub const NUMBER_ENV: &str = "CALLNOWUSA_NUMBER";
/// Optional environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "CALLNOWUSA_BASE_URL";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
        })
    }
}

#[derive(Debug)]
struct HttpRequest<'a> {
    method: HttpMethod,
    url: Url,
    params: Vec<(String, String)>,
    credentials: &'a Credentials,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: HttpRequest<'a>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest<'a>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let HttpRequest {
                method,
                url,
                params,
                credentials,
            } = request;

            let builder = match method {
                HttpMethod::Get => self.client.get(url).query(&params),
                HttpMethod::Post => self.client.post(url).form(&params),
            };
            let response = builder
                .basic_auth(
                    credentials.account_sid.as_str(),
                    Some(credentials.auth_token.as_str()),
                )
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account credentials sent with every request as HTTP basic auth.
///
/// The account sid is the user name and the auth token is the password.
pub struct Credentials {
    account_sid: AccountSid,
    auth_token: AuthToken,
}

impl Credentials {
    /// Validate that the account sid is non-empty after trimming and the token is non-empty.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            account_sid: AccountSid::new(account_sid)?,
            auth_token: AuthToken::new(auth_token)?,
        })
    }

    pub fn account_sid(&self) -> &AccountSid {
        &self.account_sid
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`Client`] and the resources it hands out.
pub enum CallNowError {
    /// A caller-supplied value failed local validation; nothing was sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// HTTP client / network failure (DNS, TLS, timeouts, connection reset).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("API error (HTTP {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
        body: Option<String>,
    },

    /// 2xx response whose body is not the expected JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] DecodeError),

    /// The configured base URL cannot be used for API requests.
    #[error("invalid base URL {raw}: {reason}")]
    InvalidBaseUrl { raw: String, reason: String },

    /// A required environment variable is not set.
    #[error("environment variable {name} is required")]
    MissingEnv { name: &'static str },
}

/// Authenticated request/response plumbing shared by every resource of one [`Client`].
#[derive(Clone)]
pub(crate) struct Transport {
    base_url: Url,
    credentials: Arc<Credentials>,
    http: Arc<dyn HttpTransport>,
}

impl Transport {
    /// Send one request to `path` (relative to the base URL) and return the JSON object body.
    ///
    /// Errors:
    /// - [`CallNowError::Transport`] when no response arrives,
    /// - [`CallNowError::Api`] for non-2xx responses,
    /// - [`CallNowError::MalformedResponse`] when a 2xx body is not a JSON object.
    async fn request(
        &self,
        method: HttpMethod,
        path: &[&str],
        params: Vec<(String, String)>,
    ) -> Result<JsonResponse, CallNowError> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "sending CallNowUSA request");

        let response = self
            .http
            .send(HttpRequest {
                method,
                url: url.clone(),
                params,
                credentials: &self.credentials,
            })
            .await
            .map_err(|err| {
                warn!(%method, %url, error = %err, "CallNowUSA request failed");
                CallNowError::Transport(err)
            })?;

        if !(200..=299).contains(&response.status) {
            warn!(%method, %url, status = response.status, "CallNowUSA returned an error status");
            let message = decode_error_message(&response.body);
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(CallNowError::Api {
                status: response.status,
                message,
                body,
            });
        }

        debug!(%method, %url, status = response.status, "CallNowUSA request succeeded");
        Ok(JsonResponse::parse(response.body)?)
    }

    fn endpoint(&self, path: &[&str]) -> Result<Url, CallNowError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CallNowError::InvalidBaseUrl {
                raw: self.base_url.to_string(),
                reason: "URL cannot be a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }
}

#[derive(Debug, Clone)]
/// Builder for [`Client`].
///
/// Use this when you need to customize the outbound number, base URL, timeout, or user-agent.
pub struct ClientBuilder {
    credentials: Credentials,
    callnowusa_number: OutboundNumber,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a builder sending from the account's `default` number.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            callnowusa_number: OutboundNumber::Default,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Number used as `from` when a request does not set its own.
    pub fn callnowusa_number(mut self, number: impl Into<OutboundNumber>) -> Self {
        self.callnowusa_number = number.into();
        self
    }

    /// Override the API base URL (`https://api.callnowusa.com/v1`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`Client`].
    pub fn build(self) -> Result<Client, CallNowError> {
        let base_url = parse_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| CallNowError::Transport(Box::new(err)))?;

        Ok(Client::with_http(
            self.credentials,
            self.callnowusa_number,
            base_url,
            Arc::new(ReqwestTransport { client }),
        ))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, CallNowError> {
    let invalid = |reason: String| CallNowError::InvalidBaseUrl {
        raw: raw.to_owned(),
        reason,
    };

    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_owned()));
    }
    Ok(url)
}

#[derive(Clone)]
/// High-level CallNowUSA client.
///
/// Holds the credentials and the default outbound number, and hands out the
/// [`MessagesResource`] and [`CallsResource`] managers. Both share one HTTP client.
pub struct Client {
    messages: MessagesResource,
    calls: CallsResource,
}

impl Client {
    /// Create a client against the default base URL.
    ///
    /// `callnowusa_number` is either a phone number or `default` for the number assigned to
    /// the account.
    ///
    /// Errors:
    /// - [`CallNowError::InvalidArgument`] when `account_sid`, `auth_token` or
    ///   `callnowusa_number` is empty.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        callnowusa_number: impl Into<String>,
    ) -> Result<Self, CallNowError> {
        let credentials = Credentials::new(account_sid, auth_token)?;
        let number = OutboundNumber::parse(callnowusa_number)?;
        Self::builder(credentials).callnowusa_number(number).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    /// Create a client from `CALLNOWUSA_*` environment variables.
    ///
    /// `CALLNOWUSA_ACCOUNT_SID` and `CALLNOWUSA_AUTH_TOKEN` are required;
    /// `CALLNOWUSA_NUMBER` and `CALLNOWUSA_BASE_URL` are optional.
    pub fn from_env() -> Result<Self, CallNowError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CallNowError> {
        let required = |name: &'static str| lookup(name).ok_or(CallNowError::MissingEnv { name });

        let credentials = Credentials::new(required(ACCOUNT_SID_ENV)?, required(AUTH_TOKEN_ENV)?)?;
        let number = match lookup(NUMBER_ENV) {
            Some(raw) => OutboundNumber::parse(raw)?,
            None => OutboundNumber::Default,
        };

        let mut builder = Self::builder(credentials).callnowusa_number(number);
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    fn with_http(
        credentials: Credentials,
        callnowusa_number: OutboundNumber,
        base_url: Url,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        let transport = Transport {
            base_url,
            credentials: Arc::new(credentials),
            http,
        };
        Self {
            messages: MessagesResource::new(transport.clone(), callnowusa_number.clone()),
            calls: CallsResource::new(transport, callnowusa_number),
        }
    }

    /// SMS operations.
    pub fn messages(&self) -> &MessagesResource {
        &self.messages
    }

    /// Direct and merged call operations.
    pub fn calls(&self) -> &CallsResource {
        &self.calls
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let transport = self.messages.transport();
        f.debug_struct("Client")
            .field("base_url", &transport.base_url.as_str())
            .field("account_sid", &transport.credentials.account_sid().as_str())
            .field("from", self.messages.from_number())
            .finish_non_exhaustive()
    }
}
