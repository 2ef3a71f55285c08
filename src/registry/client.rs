//! HTTP client shared foundation
//!
//! This module provides a blocking HTTP client with:
//! - Configurable timeout and User-Agent
//! - Status mapping to `RegistryError` (404, 429, other failures)
//!
//! Requests are never retried.

use crate::error::RegistryError;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("bundle-auto-update/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
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

        Ok(Self { client })
    }

    /// Perform a GET request with error context.
    ///
    /// Sent once; 429 and timeouts are reported to the caller, not retried.
    pub fn get_with_context(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<Response, RegistryError> {
        let response = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                RegistryError::timeout(package, registry)
            } else {
                RegistryError::network_error(package, registry, e.to_string())
            }
        })?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => Err(RegistryError::rate_limit_exceeded(registry)),
            StatusCode::NOT_FOUND => Err(RegistryError::package_not_found(package, registry)),
            status if !status.is_success() => Err(RegistryError::network_error(
                package,
                registry,
                format!("HTTP {}", status),
            )),
            _ => Ok(response),
        }
    }

    /// Perform a GET request and parse the JSON body
    pub fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get_with_context(url, package, registry)?;
        response
            .json::<T>()
            .map_err(|e| RegistryError::InvalidResponse {
                package: package.to_string(),
                registry: registry.to_string(),
                message: format!("failed to parse JSON: {}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    /// Serve `status_line` to every request and count the requests
    fn serve(status_line: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/v1/versions/rack.json", listener.local_addr().unwrap());
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                counter.fetch_add(1, Ordering::SeqCst);
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut line = String::new();
                while reader.read_line(&mut line).is_ok_and(|n| n > 0) {
                    if line == "\r\n" {
                        break;
                    }
                    line.clear();
                }
                let _ = write!(
                    stream,
                    "{}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                    status_line
                );
            }
        });

        (url, requests)
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
    fn test_default_constants() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(30));
        assert!(DEFAULT_USER_AGENT.starts_with("bundle-auto-update/"));
    }

    #[test]
    fn test_rate_limit_is_not_retried() {
        let (url, requests) = serve("HTTP/1.1 429 Too Many Requests");
        let client = HttpClient::new().unwrap();

        let result = client.get_with_context(&url, "rack", "rubygems.org");

        assert!(matches!(result, Err(RegistryError::RateLimitExceeded { .. })));
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_not_found_maps_to_package_not_found() {
        let (url, requests) = serve("HTTP/1.1 404 Not Found");
        let client = HttpClient::new().unwrap();

        let result = client.get_with_context(&url, "rack", "rubygems.org");

        assert!(matches!(result, Err(RegistryError::PackageNotFound { .. })));
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_server_error_is_network_error() {
        let (url, _) = serve("HTTP/1.1 503 Service Unavailable");
        let client = HttpClient::new().unwrap();

        let result = client.get_with_context(&url, "rack", "rubygems.org");

        assert!(matches!(result, Err(RegistryError::NetworkError { .. })));
    }
}
