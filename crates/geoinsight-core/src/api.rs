// crates/geoinsight-core/src/api.rs
#![cfg(feature = "http")]

//! # GeoInsight API client
//!
//! Thin async wrapper over the backend's REST endpoints:
//!
//! | call | endpoint |
//! |------|----------|
//! | [`ApiClient::country`] | `GET {base}/countries/{name}` |
//! | [`ApiClient::suggestions`] | `GET {base}/countries/search?query=` |
//! | [`ApiClient::health`] | `GET {base}/health` |
//! | [`ApiClient::service_status`] | `GET {base}/health/status` |
//!
//! Failures come back as [`ApiError`], whose `Display` is ready for the user.

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::model::{CountryInfo, ErrorBody, HealthStatus, ServiceStatus};
use crate::text::char_len;
use crate::traits::SuggestionSource;
use crate::validate::MIN_QUERY_LEN;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ApiError::from)?;

        Ok(Self { http, base_url })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&ApiConfig::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full country profile: demographics, weather, risk and news.
    pub async fn country(&self, name: &str) -> Result<CountryInfo> {
        let url = self.endpoint(&["countries", name])?;
        self.get_json(url).await
    }

    /// Autocomplete candidates. Queries under two characters return an empty
    /// list without touching the network.
    pub async fn suggestions(&self, query: &str) -> Result<Vec<String>> {
        if char_len(query) < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        let mut url = self.endpoint(&["countries", "search"])?;
        url.query_pairs_mut().append_pair("query", query);
        let list: Option<Vec<String>> = self.get_json(url).await?;
        Ok(list.unwrap_or_default())
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(&["health"])?;
        self.get_json(url).await
    }

    pub async fn service_status(&self) -> Result<ServiceStatus> {
        let url = self.endpoint(&["health", "status"])?;
        self.get_json(url).await
    }

    // -----------------------------------------------------------------------
    // INTERNAL
    // -----------------------------------------------------------------------

    /// Appends percent-encoded path segments to the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "making API request");
        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            warn!(%url, error = %e, "API request failed");
            ApiError::from(e)
        })?;
        let response = check_status(response).await?;
        let value = response.json::<T>().await.map_err(ApiError::from)?;
        Ok(value)
    }
}

#[async_trait]
impl SuggestionSource for ApiClient {
    async fn suggest(&self, query: &str) -> Result<Vec<String>> {
        self.suggestions(query).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(raw.to_string()).into());
    }
    Ok(url)
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let reason = status.canonical_reason().unwrap_or("Unknown status").to_string();
    // The body is best effort; a missing or non-JSON body falls back to the reason phrase.
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or(reason);
    warn!(status = status.as_u16(), %message, "API returned an error status");
    Err(ApiError::from_status(status.as_u16(), message).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoInsightError;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig::new(base)).unwrap()
    }

    fn reply(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Local server answering every request with `response`. Returns the API
    /// base URL and the request lines it has seen.
    async fn serve(response: String) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let head = read_head(&mut socket).await;
                let line = head.lines().next().unwrap_or_default().to_string();
                log.lock().unwrap().push(line);
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        (format!("http://{addr}/api"), seen)
    }

    async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => head.extend_from_slice(&buf[..n]),
            }
        }
        String::from_utf8_lossy(&head).into_owned()
    }

    fn api_error(result: Result<impl std::fmt::Debug>) -> ApiError {
        match result {
            Err(GeoInsightError::Api(err)) => err,
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[test]
    fn endpoints_extend_the_base_path() {
        let api = client("http://localhost:8080/api");
        let url = api.endpoint(&["countries", "search"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/countries/search");

        let trailing = client("http://localhost:8080/api/");
        let url = trailing.endpoint(&["health"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/health");
    }

    #[test]
    fn country_names_are_path_encoded() {
        let api = client("http://localhost:8080/api");
        let url = api.endpoint(&["countries", "South Korea"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/countries/South%20Korea");

        let url = api.endpoint(&["countries", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/countries/a%2Fb");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        for bad in ["not a url", "mailto:geo@example.com"] {
            match ApiClient::new(&ApiConfig::new(bad)) {
                Err(GeoInsightError::Api(ApiError::InvalidUrl(_))) => {}
                other => panic!("expected InvalidUrl for {bad}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn short_queries_skip_the_network() {
        // Nothing listens on port 9; a request would fail.
        let api = client("http://127.0.0.1:9/api");
        assert!(api.suggestions("G").await.unwrap().is_empty());
        assert!(api.suggestions("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn suggestions_hit_the_search_endpoint() {
        let (base, seen) = serve(reply("200 OK", r#"["Germany","Georgia"]"#)).await;
        let list = client(&base).suggestions("Ge").await.unwrap();
        assert_eq!(list, ["Germany", "Georgia"]);
        assert_eq!(
            *seen.lock().unwrap(),
            ["GET /api/countries/search?query=Ge HTTP/1.1"]
        );
    }

    #[tokio::test]
    async fn null_suggestion_body_is_an_empty_list() {
        let (base, _) = serve(reply("200 OK", "null")).await;
        assert!(client(&base).suggestions("Xy").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let body = r#"{"errorMessage":"Invalid country name format"}"#;
        let (base, seen) = serve(reply("400 Bad Request", body)).await;

        let err = api_error(client(&base).country("South Korea").await);
        assert_eq!(err.to_string(), "Error 400: Invalid country name format");
        assert_eq!(
            *seen.lock().unwrap(),
            ["GET /api/countries/South%20Korea HTTP/1.1"]
        );
    }

    #[tokio::test]
    async fn missing_error_body_falls_back_to_reason_phrase() {
        let (base, _) = serve(reply("429 Too Many Requests", "")).await;
        let err = api_error(client(&base).health().await);
        assert_eq!(err.to_string(), "Error 429: Too Many Requests");
    }

    #[tokio::test]
    async fn not_found_uses_the_fixed_message() {
        let body = r#"{"message":"No such country"}"#;
        let (base, _) = serve(reply("404 Not Found", body)).await;
        let err = api_error(client(&base).country("Atlantis").await);
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(err.to_string(), "Country not found - please check the spelling");
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let (base, _) = serve(reply("200 OK", "{not json")).await;
        let err = api_error(client(&base).service_status().await);
        assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold the connection without answering.
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = ApiConfig::new(format!("http://{addr}/api"))
            .with_timeout(Duration::from_millis(200));
        let api = ApiClient::new(&config).unwrap();
        let err = api_error(api.health().await);
        assert!(matches!(err, ApiError::Timeout), "got {err:?}");
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() {
        // Grab a free port, then close it so nothing listens there.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = api_error(client(&format!("http://{addr}/api")).health().await);
        assert!(matches!(err, ApiError::Network), "got {err:?}");
    }
}
