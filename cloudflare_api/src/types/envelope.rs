use std::fmt;

use serde::{Deserialize, Serialize};

/// The outer object wrapping every enveloped API response.
///
/// When `success` is false the `result` field is meaningless and is never
/// handed to callers.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Envelope<T> {
    pub success: bool,

    #[serde(default)]
    pub errors: Vec<ApiError>,

    #[serde(default)]
    pub messages: Vec<ApiMessage>,

    pub result: Option<T>,

    /// Page-number pagination metadata.
    #[serde(rename = "result_info", default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,

    /// Cursor pagination metadata.
    #[serde(rename = "cursor_result_info", default, skip_serializing_if = "Option::is_none")]
    pub cursor_info: Option<CursorInfo>,
}

/// A single error reported by the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl ApiError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Informational message. Most endpoints send plain strings, some send
/// `{code, message}` objects; both decode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ApiMessage {
    Text(String),
    Detailed {
        #[serde(default)]
        code: Option<i32>,
        message: String,
    },
}

impl fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiMessage::Text(text) => f.write_str(text),
            ApiMessage::Detailed {
                code: Some(code),
                message,
            } => write!(f, "{code}: {message}"),
            ApiMessage::Detailed { code: None, message } => f.write_str(message),
        }
    }
}

/// `result_info` block of page-number listings.
///
/// `count` is the number of items in the current page only. Some endpoint
/// families also place a continuation cursor here.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// `cursor_result_info` block of cursor listings. A missing or empty
/// cursor means there are no further pages.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorInfo {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}
