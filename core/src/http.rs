//! HTTP request and response types as plain data.
//!
//! # Design
//! `build_request` turns a verb, URL and optional payload into an
//! `HttpRequest` without touching the network, and `parse_response` turns a
//! completed `HttpResponse` into JSON. Transports sit between the two and own
//! the actual I/O, which keeps both ends deterministic and easy to test.

use std::fmt;

use crate::error::RequestError;
use crate::params::{encode_params, ParamMap};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a form-encoded body.
    pub fn sends_body(self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Transports fill this in as the exchange progresses; `status` is `0` until
/// headers have been received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Build the request for one call.
///
/// GET never carries a body and ignores `data` entirely, including as query
/// parameters. Every other verb sends `data` form-encoded, or an empty body
/// when `data` is omitted.
pub fn build_request(method: HttpMethod, url: &str, data: Option<&ParamMap>) -> HttpRequest {
    if !method.sends_body() {
        return HttpRequest {
            method,
            url: url.to_string(),
            headers: Vec::new(),
            body: None,
        };
    }

    let body = data.map(encode_params).unwrap_or_default();
    HttpRequest {
        method,
        url: url.to_string(),
        headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
        body: Some(body),
    }
}

/// Parse a completed response body as JSON.
///
/// The status code is not inspected: a 500 with a JSON body parses the same
/// way a 200 does.
pub fn parse_response(response: &HttpResponse) -> Result<serde_json::Value, RequestError> {
    Ok(serde_json::from_str(&response.body)?)
}
