use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::TransportError;

pub const DEFAULT_USER_AGENT: &str = concat!("steam-stats/", env!("CARGO_PKG_VERSION"));

/// Query parameters whose values never appear in logs.
const SECRET_PARAMS: [&str; 2] = ["key", "api_key"];

/// Longest response excerpt carried in an error.
const EXCERPT_LEN: usize = 200;

/// Fetch a URL and decode its JSON body into a caller-chosen type.
///
/// Both resolvers are written against this trait so tests can serve canned
/// responses without a network.
pub trait Fetcher {
    fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, TransportError>;
}

impl<F: Fetcher> Fetcher for &F {
    fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, TransportError> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP client that performs a single GET per call. No retries.
pub struct JsonFetcher {
    http: reqwest::blocking::Client,
}

impl JsonFetcher {
    /// Build a client that sends `user_agent` with every request.
    ///
    /// GiantBomb rejects requests that carry no User-Agent. No timeout is set
    /// here; a call ends when the HTTP client itself succeeds or fails.
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(user_agent.to_string())
            .build()?;
        Ok(Self { http })
    }
}

impl Fetcher for JsonFetcher {
    fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, TransportError> {
        log::debug!("GET {}", redact_url(url));

        let resp = self.http.get(url).send()?;
        let status = resp.status();
        let text = resp.text()?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: excerpt(&text),
            });
        }

        decode(&text)
    }
}

/// Decode a JSON body, keeping an excerpt of it on failure.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, TransportError> {
    serde_json::from_str(text).map_err(|source| TransportError::Decode {
        source,
        body: excerpt(text),
    })
}

/// Replace API key values in a URL's query string so it can be logged.
///
/// Strings that do not parse as URLs are returned unchanged.
pub fn redact_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    if parsed.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let value = if SECRET_PARAMS.contains(&k.as_ref()) {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_LEN).collect()
}
