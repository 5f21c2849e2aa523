use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::FetchError;
use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_LISTINGS_PATH: &str = "anuncios";

/// Where and how to reach the listings endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub listings_path: String,
    /// Whole-request timeout enforced by the transport. `None` leaves it to
    /// the OS.
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listings_path: DEFAULT_LISTINGS_PATH.to_string(),
            request_timeout: None,
            connect_timeout: None,
        }
    }
}

/// Anything that can produce the raw listings payload.
///
/// The payload is returned undecoded into domain types; callers normalize it.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Human-readable target, for logs.
    fn endpoint(&self) -> String;

    async fn fetch_listings(&self) -> Result<Value>;
}

/// `reqwest`-backed [`ListingSource`] for `GET {base_url}/{listings_path}`.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    settings: ClientSettings,
}

impl BackendClient {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("anuncios-tui/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| FetchError::unexpected_with_source("failed to build HTTP client", e))?;
        Ok(Self { http, settings })
    }

    pub fn listings_url(&self) -> Result<Url> {
        listings_url(&self.settings.base_url, &self.settings.listings_path)
    }
}

#[async_trait]
impl ListingSource for BackendClient {
    fn endpoint(&self) -> String {
        match self.listings_url() {
            Ok(url) => url.to_string(),
            Err(_) => format!(
                "{} + {}",
                self.settings.base_url, self.settings.listings_path
            ),
        }
    }

    async fn fetch_listings(&self) -> Result<Value> {
        let url = self.listings_url()?;
        debug!(%url, "requesting listings");

        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| classify_send_error(&url, err))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "listings request rejected");
            return Err(FetchError::server(status.as_u16()));
        }

        // Headers arrived but the body did not; nothing usable came back.
        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::unreachable_with_source(url.as_str(), err))?;
        debug!(%url, bytes = body.len(), "listings response received");
        Ok(decode_body(&body))
    }
}

/// Join `base_url` and `path` into the absolute listings URL.
///
/// Slashes at the seam are normalized so `http://h:3000/` + `/anuncios` and
/// `http://h:3000` + `anuncios` agree. Only `http` and `https` are accepted.
pub fn listings_url(base_url: &str, path: &str) -> Result<Url> {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');
    let joined = if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    };
    let url = Url::parse(&joined).map_err(|e| {
        FetchError::unexpected_with_source(format!("invalid listings URL `{joined}`"), e)
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::unexpected(format!(
            "unsupported URL scheme `{other}`"
        ))),
    }
}

/// Decode a success body leniently.
///
/// Blank bodies become `null`; bodies that are not JSON are kept as a JSON
/// string so the caller still sees "something that is not a list".
pub fn decode_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            debug!("listings body is not JSON: {err}");
            Value::String(String::from_utf8_lossy(body).into_owned())
        }
    }
}

fn classify_send_error(url: &Url, err: reqwest::Error) -> FetchError {
    if err.is_builder() {
        return FetchError::unexpected_with_source("failed to build listings request", err);
    }
    if err.is_redirect() {
        return FetchError::unexpected_with_source("redirect policy rejected the response", err);
    }
    // Connect, timeout and mid-flight transport failures: the request left
    // but no response made it back.
    FetchError::unreachable_with_source(url.as_str(), err)
}
