//! HTTP Layer
//!
//! `Transport` is the seam between the client and the network: the browser
//! build uses reqwest (fetch under wasm32), tests script responses in memory.

mod client;
mod reqwest_transport;
mod timeout;

pub use client::ApiClient;
pub use reqwest_transport::ReqwestTransport;
pub use timeout::TimeoutTransport;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Authentication endpoints never go through refresh-and-retry
pub const AUTH_PATH_PREFIX: &str = "/otentikasi/";

/// Characters left unescaped in query strings and path segments
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One REST call relative to the API base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add the parameter only when the value is present and not blank
    pub fn query_opt(self, key: &str, value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => self.query(key, v),
            _ => self,
        }
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// `page=2&page_size=20`
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{}={}", utf8_percent_encode(k, UNRESERVED), utf8_percent_encode(v, UNRESERVED)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn is_auth_endpoint(&self) -> bool {
        self.path.starts_with(AUTH_PATH_PREFIX)
    }

    /// "GET /pasien?page=1" for log lines
    pub fn describe(&self) -> String {
        if self.query.is_empty() {
            format!("{} {}", self.method.as_str(), self.path)
        } else {
            format!("{} {}?{}", self.method.as_str(), self.path, self.query_string())
        }
    }
}

/// Percent-encode one identifier for use as a path segment
pub fn encode_segment(id: &str) -> String {
    utf8_percent_encode(id, UNRESERVED).to_string()
}

/// Status and decoded JSON body (Null when the body was empty)
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_result(self) -> ApiResult<Value> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(ApiError::from_status(self.status, &self.body))
        }
    }

    pub fn decode<T: DeserializeOwned>(self) -> ApiResult<T> {
        let body = self.into_result()?;
        Ok(serde_json::from_value(body)?)
    }
}

/// Sends one request. Returns `Err` only when no HTTP response was
/// received; error statuses come back as `Ok` for the caller to inspect.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ApiRequest, bearer: Option<&str>) -> ApiResult<ApiResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_string_encoding() {
        let request = ApiRequest::get("/pasien")
            .query("page", 2)
            .query("page_size", 20)
            .query_opt("search", Some("Siti Aminah"));
        assert_eq!(request.query_string(), "page=2&page_size=20&search=Siti%20Aminah");
        assert_eq!(request.describe(), "GET /pasien?page=2&page_size=20&search=Siti%20Aminah");
    }

    #[test]
    fn test_query_opt_skips_blank() {
        let request = ApiRequest::get("/pengguna").query_opt("role", Some("  ")).query_opt("x", None);
        assert!(request.query.is_empty());
        assert_eq!(request.describe(), "GET /pengguna");
    }

    #[test]
    fn test_auth_endpoint_detection() {
        assert!(ApiRequest::post("/otentikasi/segarkan").is_auth_endpoint());
        assert!(!ApiRequest::get("/pasien").is_auth_endpoint());
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("a1b2-c3"), "a1b2-c3");
        assert_eq!(encode_segment("../x"), "..%2Fx");
    }

    #[test]
    fn test_response_into_result() {
        assert_eq!(ApiResponse::new(204, Value::Null).into_result(), Ok(Value::Null));
        let err = ApiResponse::new(403, json!({"message": "no"})).into_result().unwrap_err();
        assert!(err.is_forbidden());
    }
}
