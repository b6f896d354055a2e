//! HTTP client for the remote lookup search service.
//!
//! This crate implements [`SearchService`] over HTTP. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Discovering the base URL and bearer token from `LOOKUP_API_BASE` /
//!   `LOOKUP_API_TOKEN`
//! - Validating the base URL for safety
//! - Posting the searcher bundle and returning the raw response text, which
//!   the engine decodes
//!
//! # Example
//!
//! ```ignore
//! use lookup_api::HttpSearchService;
//!
//! let service = HttpSearchService::new_from_env()?;
//! let payload = service.fetch_recent(&searcher).await?;
//! ```

use std::env;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use lookup_engine::SearchService;
use lookup_types::{SearchError, Searcher};
use reqwest::{Client, header};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

/// Environment variable holding the search service base URL.
pub const API_BASE_ENV: &str = "LOOKUP_API_BASE";
/// Environment variable holding the bearer token, if the service needs one.
pub const API_TOKEN_ENV: &str = "LOOKUP_API_TOKEN";
/// Base URL used when `LOOKUP_API_BASE` is unset.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/lookup";

/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

#[derive(Serialize)]
struct SearchRequestBody<'a> {
    searcher: &'a Searcher,
}

/// Search service reached over HTTP.
///
/// Every operation POSTs `{"searcher": ...}` to its endpoint and returns the
/// body of a successful response verbatim:
///
/// - `POST {base}/recent`
/// - `POST {base}/search`
/// - `POST {base}/records/{id}`
#[derive(Debug, Clone)]
pub struct HttpSearchService {
    base_url: Url,
    http: Client,
    user_agent: String,
}

impl HttpSearchService {
    /// Build a client for `base_url`, authenticating with `token` when given.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let base_url = validate_base_url(base_url)?;

        let mut default_headers = header::HeaderMap::new();
        if let Some(token) = token {
            let authorization = header::HeaderValue::from_str(&format!("Bearer {token}")).context("invalid API token")?;
            default_headers.insert(header::AUTHORIZATION, authorization);
        }
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;

        Ok(Self {
            base_url,
            http,
            user_agent: format!("lookup/0.1; {}", env::consts::OS),
        })
    }

    /// Construct a client from `LOOKUP_API_BASE` and `LOOKUP_API_TOKEN`.
    pub fn new_from_env() -> Result<Self> {
        let base_url = env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.into());
        Self::with_env_token(&base_url)
    }

    /// Construct a client for an explicit base URL, still reading the token
    /// from `LOOKUP_API_TOKEN`.
    pub fn with_env_token(base_url: &str) -> Result<Self> {
        let token = env::var(API_TOKEN_ENV).ok().filter(|token| !token.trim().is_empty());
        Self::new(base_url, token)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path relative to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SearchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SearchError::Unavailable {
                message: format!("base URL '{}' cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post(&self, url: Url, searcher: &Searcher) -> Result<String, SearchError> {
        debug!(%url, object = %searcher.object_name, "posting lookup request");
        let response = self
            .http
            .post(url.clone())
            .header(header::USER_AGENT, &self.user_agent)
            .json(&SearchRequestBody { searcher })
            .send()
            .await
            .map_err(|error| SearchError::Transport { message: error.to_string() })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| SearchError::Transport { message: error.to_string() })?;
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "lookup request rejected");
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl SearchService for HttpSearchService {
    async fn fetch_recent(&self, searcher: &Searcher) -> Result<String, SearchError> {
        let url = self.endpoint(&["recent"])?;
        self.post(url, searcher).await
    }

    async fn fetch_by_query(&self, searcher: &Searcher) -> Result<String, SearchError> {
        let url = self.endpoint(&["search"])?;
        self.post(url, searcher).await
    }

    async fn fetch_by_id(&self, searcher: &Searcher, id: &str) -> Result<String, SearchError> {
        let url = self.endpoint(&["records", id])?;
        self.post(url, searcher).await
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
fn validate_base_url(base: &str) -> Result<Url> {
    let parsed_base_url = Url::parse(base).map_err(|e| anyhow!("Invalid {} URL '{}': {}", API_BASE_ENV, base, e))?;

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| anyhow!("{} must include a host", API_BASE_ENV))?;

    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(parsed_base_url);
    }

    if parsed_base_url.scheme() != "https" {
        return Err(anyhow!(
            "{} must use https for non-localhost hosts; got '{}://'",
            API_BASE_ENV,
            parsed_base_url.scheme()
        ));
    }

    Ok(parsed_base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_allows_plain_http() {
        assert!(validate_base_url("http://localhost:8080/lookup").is_ok());
        assert!(validate_base_url("http://127.0.0.1:3000").is_ok());
    }

    #[test]
    fn remote_hosts_require_https() {
        assert!(validate_base_url("http://search.example.com").is_err());
        assert!(validate_base_url("https://search.example.com").is_ok());
    }

    #[test]
    fn rejects_unparseable_urls() {
        let error = validate_base_url("not a url").expect_err("invalid url");
        assert!(error.to_string().contains(API_BASE_ENV));
    }

    #[test]
    fn explicit_base_is_validated_with_env_token() {
        assert!(HttpSearchService::with_env_token("http://search.example.com").is_err());
        let service = HttpSearchService::with_env_token("http://localhost:9000/lookup").expect("service");
        assert_eq!(service.base_url().as_str(), "http://localhost:9000/lookup");
    }

    #[test]
    fn endpoints_extend_the_base_path() {
        let service = HttpSearchService::new("https://search.example.com/api/lookup/", None).expect("service");
        let url = service.endpoint(&["records", "001 A"]).expect("endpoint");
        assert_eq!(url.as_str(), "https://search.example.com/api/lookup/records/001%20A");
        let url = service.endpoint(&["recent"]).expect("endpoint");
        assert_eq!(url.as_str(), "https://search.example.com/api/lookup/recent");
    }

    #[tokio::test]
    async fn unreachable_service_maps_to_transport_error() {
        let service = HttpSearchService::new("http://127.0.0.1:9", None).expect("service");
        let searcher = Searcher::new("", "Account", "Name", "Id");
        let error = service.fetch_recent(&searcher).await.expect_err("no listener on the discard port");
        assert!(matches!(error, SearchError::Transport { .. }));
    }
}
