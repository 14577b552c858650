//! HTTP client shared by the repository hosts
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Exponential backoff retry logic (max 3 retries)
//! - Per-request authentication (basic auth or private token)
//! - `Link: <...>; rel="next"` pagination

use crate::error::RegistryError;
use reqwest::header::{HeaderMap, LINK};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("snapup/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// Upper bound on followed pages per listing
const MAX_PAGES: usize = 100;

/// Header carrying a GitLab private token
const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Authentication attached to a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Auth {
    /// No credentials
    #[default]
    Anonymous,
    /// HTTP basic auth
    Basic { user: String, password: String },
    /// GitLab `PRIVATE-TOKEN` header
    PrivateToken(String),
}

impl Auth {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Auth::Anonymous => request,
            Auth::Basic { user, password } => request.basic_auth(user, Some(password)),
            Auth::PrivateToken(token) => request.header(PRIVATE_TOKEN_HEADER, token),
        }
    }
}

/// Identifies the request in errors and logs
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    /// Repository being queried
    pub repository: &'a str,
    /// Host display name
    pub host: &'a str,
    /// Credentials for the host
    pub auth: &'a Auth,
}

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request with retry logic and error context
    pub async fn get(&self, url: &str, ctx: RequestContext<'_>) -> Result<Response, RegistryError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            debug!(url, attempt, "GET");
            let request = ctx.auth.apply(self.client.get(url));

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(RegistryError::rate_limit_exceeded(ctx.host));

                        if attempt < self.max_retries {
                            warn!(host = ctx.host, delay_ms = delay, "rate limited, retrying");
                            tokio::time::sleep(Duration::from_millis(delay)).await;
                            delay *= 2;
                        }
                        continue;
                    }

                    return check_status(response, ctx);
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(RegistryError::timeout(ctx.repository, ctx.host));
                    } else {
                        last_error = Some(RegistryError::network_error(
                            ctx.repository,
                            ctx.host,
                            e.to_string(),
                        ));
                    }

                    if attempt < self.max_retries {
                        warn!(url, error = %e, delay_ms = delay, "request failed, retrying");
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            RegistryError::network_error(ctx.repository, ctx.host, "unknown error")
        }))
    }

    /// Perform a GET request and parse the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        ctx: RequestContext<'_>,
    ) -> Result<T, RegistryError> {
        let response = self.get(url, ctx).await?;
        parse_json(response, ctx).await
    }

    /// Fetch every page of a JSON array listing, following `rel="next"` links
    pub async fn get_paginated<T: DeserializeOwned>(
        &self,
        url: &str,
        ctx: RequestContext<'_>,
    ) -> Result<Vec<T>, RegistryError> {
        let mut items = Vec::new();
        let mut next = Some(url.to_string());
        let mut pages = 0;

        while let Some(page_url) = next.take() {
            if pages == MAX_PAGES {
                warn!(url, pages, "page limit reached, listing truncated");
                break;
            }

            let response = self.get(&page_url, ctx).await?;
            next = next_link(response.headers());
            let page: Vec<T> = parse_json(response, ctx).await?;

            pages += 1;
            debug!(url = %page_url, page = pages, items = page.len(), "fetched page");
            items.extend(page);
        }

        Ok(items)
    }
}

fn check_status(response: Response, ctx: RequestContext<'_>) -> Result<Response, RegistryError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(RegistryError::repository_not_found(ctx.repository, ctx.host));
    }

    if status == StatusCode::FORBIDDEN && rate_limit_exhausted(response.headers()) {
        return Err(RegistryError::rate_limit_exceeded(ctx.host));
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(RegistryError::AuthenticationError {
            host: ctx.host.to_string(),
            message: format!("HTTP {}", status),
        });
    }

    Err(RegistryError::network_error(
        ctx.repository,
        ctx.host,
        format!("HTTP {}", status),
    ))
}

async fn parse_json<T: DeserializeOwned>(
    response: Response,
    ctx: RequestContext<'_>,
) -> Result<T, RegistryError> {
    response.json::<T>().await.map_err(|e| {
        RegistryError::invalid_response(
            ctx.repository,
            ctx.host,
            format!("failed to parse JSON: {}", e),
        )
    })
}

fn rate_limit_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

/// Extract the `rel="next"` target from a `Link` header
fn next_link(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(LINK)?.to_str().ok()?;
    parse_next_link(header)
}

fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn ctx(auth: &Auth) -> RequestContext<'_> {
        RequestContext {
            repository: "o/r",
            host: "Test",
            auth,
        }
    }

    fn client() -> HttpClient {
        HttpClient::new().unwrap().with_max_retries(0)
    }

    #[test]
    fn test_http_client_creation() {
        assert!(HttpClient::new().is_ok());
    }

    #[test]
    fn test_http_client_with_config() {
        let client = HttpClient::with_config(Duration::from_secs(60), "test-agent/1.0");
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_with_max_retries() {
        let client = HttpClient::new().unwrap().with_max_retries(5);
        assert_eq!(client.max_retries, 5);
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(30));
        assert!(DEFAULT_USER_AGENT.starts_with("snapup/"));
        assert_eq!(MAX_RETRIES, 3);
        assert_eq!(BASE_DELAY_MS, 100);
    }

    #[test]
    fn test_parse_next_link() {
        let header = r#"<https://api.github.com/repositories/1/tags?page=2>; rel="next", <https://api.github.com/repositories/1/tags?page=5>; rel="last""#;
        assert_eq!(
            parse_next_link(header).as_deref(),
            Some("https://api.github.com/repositories/1/tags?page=2")
        );
    }

    #[test]
    fn test_parse_next_link_absent_on_last_page() {
        let header = r#"<https://api.github.com/repositories/1/tags?page=1>; rel="first", <https://api.github.com/repositories/1/tags?page=4>; rel="prev""#;
        assert_eq!(parse_next_link(header), None);
    }

    #[test]
    fn test_parse_next_link_garbage() {
        assert_eq!(parse_next_link("not a link header"), None);
        assert_eq!(parse_next_link(""), None);
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/value")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "v1.0"}"#)
            .create_async()
            .await;

        let value: serde_json::Value = client()
            .get_json(&format!("{}/value", server.url()), ctx(&Auth::Anonymous))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(value["name"], "v1.0");
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let result = client()
            .get(&format!("{}/missing", server.url()), ctx(&Auth::Anonymous))
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::RepositoryNotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_rate_limited_after_retries() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/limited")
            .with_status(429)
            .expect(2)
            .create_async()
            .await;

        let result = HttpClient::new()
            .unwrap()
            .with_max_retries(1)
            .get(&format!("{}/limited", server.url()), ctx(&Auth::Anonymous))
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::RateLimitExceeded { .. })));
    }

    #[tokio::test]
    async fn test_forbidden_with_exhausted_quota_is_rate_limit() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/quota")
            .with_status(403)
            .with_header("x-ratelimit-remaining", "0")
            .create_async()
            .await;

        let result = client()
            .get(&format!("{}/quota", server.url()), ctx(&Auth::Anonymous))
            .await;

        assert!(matches!(result, Err(RegistryError::RateLimitExceeded { .. })));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/private")
            .with_status(401)
            .create_async()
            .await;

        let result = client()
            .get(&format!("{}/private", server.url()), ctx(&Auth::Anonymous))
            .await;

        assert!(matches!(result, Err(RegistryError::AuthenticationError { .. })));
    }

    #[tokio::test]
    async fn test_server_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/broken")
            .with_status(500)
            .create_async()
            .await;

        let result = client()
            .get(&format!("{}/broken", server.url()), ctx(&Auth::Anonymous))
            .await;

        assert!(matches!(result, Err(RegistryError::NetworkError { .. })));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/html")
            .with_status(200)
            .with_body("<html></html>")
            .create_async()
            .await;

        let result: Result<serde_json::Value, _> = client()
            .get_json(&format!("{}/html", server.url()), ctx(&Auth::Anonymous))
            .await;

        assert!(matches!(result, Err(RegistryError::InvalidResponse { .. })));
    }

    #[tokio::test]
    async fn test_basic_auth_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/auth")
            .match_header("authorization", "Basic b2N0b2NhdDphYmM=")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let auth = Auth::Basic {
            user: "octocat".to_string(),
            password: "abc".to_string(),
        };
        let items: Vec<serde_json::Value> = client()
            .get_json(&format!("{}/auth", server.url()), ctx(&auth))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_private_token_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/token")
            .match_header("private-token", "glpat-secret")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let auth = Auth::PrivateToken("glpat-secret".to_string());
        let _: Vec<serde_json::Value> = client()
            .get_json(&format!("{}/token", server.url()), ctx(&auth))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_paginated_follows_next_links() {
        let mut server = Server::new_async().await;
        let page2 = format!("{}/items/page2", server.url());
        let page3 = format!("{}/items/page3", server.url());

        let m1 = server
            .mock("GET", "/items")
            .with_status(200)
            .with_header("link", &format!("<{}>; rel=\"next\"", page2))
            .with_body(r#"[1, 2]"#)
            .create_async()
            .await;
        let m2 = server
            .mock("GET", "/items/page2")
            .with_status(200)
            .with_header("link", &format!("<{}>; rel=\"next\"", page3))
            .with_body(r#"[3]"#)
            .create_async()
            .await;
        let m3 = server
            .mock("GET", "/items/page3")
            .with_status(200)
            .with_body(r#"[4, 5]"#)
            .create_async()
            .await;

        let items: Vec<u32> = client()
            .get_paginated(&format!("{}/items", server.url()), ctx(&Auth::Anonymous))
            .await
            .unwrap();

        m1.assert_async().await;
        m2.assert_async().await;
        m3.assert_async().await;
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_get_paginated_propagates_page_error() {
        let mut server = Server::new_async().await;
        let page2 = format!("{}/items/page2", server.url());

        let _m1 = server
            .mock("GET", "/items")
            .with_status(200)
            .with_header("link", &format!("<{}>; rel=\"next\"", page2))
            .with_body(r#"[1]"#)
            .create_async()
            .await;
        let _m2 = server
            .mock("GET", "/items/page2")
            .with_status(500)
            .create_async()
            .await;

        let result: Result<Vec<u32>, _> = client()
            .get_paginated(&format!("{}/items", server.url()), ctx(&Auth::Anonymous))
            .await;

        assert!(result.is_err());
    }
}
