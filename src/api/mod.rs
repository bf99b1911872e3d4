/// HTTP client for the remote inference API.
///
/// Talks to the API at `http://localhost:5000/api` (configurable) using the
/// synchronous `ureq` HTTP client. Every call is a single round trip:
///
/// - **GET** for the informational endpoints (`/status`, `/modelo`).
/// - **POST** with a JSON body for the inference endpoints (`/sentimento`,
///   `/gerar`, `/resumir`).
///
/// There is no retry and no cancellation. A failed call is surfaced to the
/// caller immediately as `Erro na requisição: <reason>`.
use std::fmt;
use std::time::Duration;

use anyhow::{Result, anyhow};
use serde::Serialize;
use serde_json::Value;

use crate::config::schema::ApiConfig;

pub mod types;

/// Prefix used for every transport or parse failure shown to the user.
pub const REQUEST_ERROR_PREFIX: &str = "Erro na requisição";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// HTTP method used by the API. Reads are `Get`, everything else is `Post`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }

    /// Whether this method carries a request body.
    pub fn is_write(self) -> bool {
        matches!(self, Self::Post)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single API call, built per user action and dropped after the response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Path relative to the base URL, e.g. `/sentimento`.
    pub endpoint: String,
    pub method: Method,
    /// JSON payload. Only sent when `method` is a write.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Read-only request with no body.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: Method::Get,
            body: None,
        }
    }

    /// Write request carrying `payload` serialized as JSON.
    pub fn post<T: Serialize>(endpoint: impl Into<String>, payload: &T) -> Result<Self> {
        let body = serde_json::to_value(payload)
            .map_err(|e| anyhow!("{REQUEST_ERROR_PREFIX}: {e}"))?;
        Ok(Self {
            endpoint: endpoint.into(),
            method: Method::Post,
            body: Some(body),
        })
    }

    /// Serialized body, present only for writes that have a payload.
    pub fn body_text(&self) -> Option<String> {
        if !self.method.is_write() {
            return None;
        }
        self.body.as_ref().map(Value::to_string)
    }
}

// ---------------------------------------------------------------------------
// Transport seam
// ---------------------------------------------------------------------------

/// Anything that can execute an [`ApiRequest`] and hand back the JSON body.
///
/// Handlers are generic over this trait so they can run against the real
/// HTTP client or an in-memory double. `Sync` because the startup routine
/// fires the status and model-info fetches from two threads at once.
pub trait Transport: Sync {
    fn send(&self, request: &ApiRequest) -> Result<Value>;

    /// Base URL requests are resolved against, for logging.
    fn base_url(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Blocking `ureq` client bound to one base URL.
#[derive(Debug)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    /// Build a client from the resolved `[api]` config section.
    ///
    /// `timeout_ms = 0` means no timeout: a hung call blocks its caller
    /// until the connection is closed.
    pub fn from_config(config: &ApiConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        Self {
            agent: builder.build(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

impl Transport for ApiClient {
    fn send(&self, request: &ApiRequest) -> Result<Value> {
        let url = self.url_for(&request.endpoint);
        let call = self
            .agent
            .request(request.method.as_str(), &url)
            .set("Content-Type", "application/json");

        let result = match request.body_text() {
            Some(body) => call.send_string(&body),
            None => call.call(),
        };

        // The API answers logical failures with 4xx/5xx and a JSON body, so a
        // status error still carries a response worth parsing.
        let response = match result {
            Ok(resp) => resp,
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(e) => return Err(anyhow!("{REQUEST_ERROR_PREFIX}: {e}")),
        };

        let text = response
            .into_string()
            .map_err(|e| anyhow!("{REQUEST_ERROR_PREFIX}: {e}"))?;
        parse_body(&text)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Parse a response body as JSON, wrapping failures with the request prefix.
pub fn parse_body(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| anyhow!("{REQUEST_ERROR_PREFIX}: {e}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_request_has_no_body() {
        let req = ApiRequest::get("/status");
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.body_text(), None);
    }

    #[test]
    fn post_request_serializes_payload() {
        let req = ApiRequest::post("/sentimento", &serde_json::json!({ "texto": "oi" })).unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.body_text().as_deref(), Some(r#"{"texto":"oi"}"#));
    }

    #[test]
    fn body_ignored_on_get() {
        let req = ApiRequest {
            endpoint: "/status".to_string(),
            method: Method::Get,
            body: Some(serde_json::json!({ "x": 1 })),
        };
        assert_eq!(req.body_text(), None);
    }

    #[test]
    fn client_strips_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:5000/api/".to_string(),
            timeout_ms: 0,
        };
        let client = ApiClient::from_config(&config);
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.url_for("/status"), "http://localhost:5000/api/status");
    }

    #[test]
    fn parse_body_wraps_errors_with_prefix() {
        let err = parse_body("<html>502</html>").unwrap_err();
        assert!(err.to_string().starts_with("Erro na requisição: "));
    }

    #[test]
    fn unreachable_host_is_a_prefixed_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_ms: 2_000,
        };
        let client = ApiClient::from_config(&config);
        let err = client.send(&ApiRequest::get("/status")).unwrap_err();
        assert!(err.to_string().starts_with("Erro na requisição: "));
    }
}
