//! Raw transport responses, before envelope interpretation.

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

/// Trace identifier attached to every Cloudflare response.
pub const RAY_ID_HEADER: &str = "cf-ray";

/// A fully-read HTTP response. The body has already been drained to text,
/// so the value can be logged and inspected after the connection is gone.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Reason phrase for the status code, empty for non-standard codes.
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Headers worth keeping for postmortem. Never used for control flow.
    pub fn diagnostics(&self) -> ResponseDiagnostics {
        ResponseDiagnostics {
            ray_id: self.header(RAY_ID_HEADER).map(str::to_string),
            retry_after: self.header("retry-after").map(str::to_string),
            rate_limit: self.header("ratelimit").map(str::to_string),
            rate_limit_policy: self.header("ratelimit-policy").map(str::to_string),
        }
    }
}

/// Rate-limit and trace headers captured from a response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseDiagnostics {
    pub ray_id: Option<String>,
    pub retry_after: Option<String>,
    pub rate_limit: Option<String>,
    pub rate_limit_policy: Option<String>,
}

/// Shortens a body for log lines and error snippets.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
