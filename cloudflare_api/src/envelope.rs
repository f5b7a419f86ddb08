//! Interpretation of the success/error envelope.
//!
//! Success is decided in two layers: first the HTTP status, then the
//! envelope's own `success` flag, which wins over a 2xx status.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::response::{truncate_body, RawResponse};
use crate::types::{ApiError, ApiMessage, Envelope};
use crate::Error;

/// Error-side view of an envelope. Lenient so that a non-2xx body carrying
/// only `errors` is still recognised.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ApiError>,
    #[serde(default)]
    messages: Vec<ApiMessage>,
}

/// Turns a response into its `result`, which may legitimately be absent
/// (for example on deletes).
pub fn process<T: DeserializeOwned>(raw: &RawResponse) -> Result<Option<T>, Error> {
    Ok(process_envelope::<T>(raw)?.result)
}

/// Like [`process`] but keeps the whole envelope, including pagination
/// metadata.
pub fn process_envelope<T: DeserializeOwned>(raw: &RawResponse) -> Result<Envelope<T>, Error> {
    if !raw.status.is_success() {
        return Err(status_error(raw));
    }

    // Parsed untyped first: a failed envelope may carry a `result` that
    // does not match `T`, and it has to surface as an API error rather
    // than a deserialization error.
    let envelope: Envelope<serde_json::Value> =
        serde_json::from_str(&raw.body).map_err(|e| deserialization_error(raw, e))?;

    if !envelope.success {
        tracing::error!(
            "{} {} reported failure: {}",
            raw.method,
            raw.url,
            describe(&envelope.errors)
        );
        return Err(Error::Api {
            status: raw.status.as_u16(),
            errors: envelope.errors,
            messages: envelope.messages,
        });
    }

    let result = match envelope.result {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => Some(serde_json::from_value(value).map_err(|e| deserialization_error(raw, e))?),
    };

    Ok(Envelope {
        success: true,
        errors: envelope.errors,
        messages: envelope.messages,
        result,
        page_info: envelope.page_info,
        cursor_info: envelope.cursor_info,
    })
}

/// For endpoints that return a bare body (exports): same status handling,
/// but a successful body is returned verbatim.
pub fn process_raw(raw: &RawResponse) -> Result<String, Error> {
    if !raw.status.is_success() {
        return Err(status_error(raw));
    }
    Ok(raw.body.clone())
}

/// Classifies a non-2xx response.
fn status_error(raw: &RawResponse) -> Error {
    let diagnostics = raw.diagnostics();
    tracing::error!(
        "{} {} failed with status {} (ray id: {}, ratelimit: {}): {}",
        raw.method,
        raw.url,
        raw.status,
        diagnostics.ray_id.as_deref().unwrap_or("-"),
        diagnostics.rate_limit.as_deref().unwrap_or("-"),
        truncate_body(&raw.body)
    );

    match serde_json::from_str::<ErrorBody>(&raw.body) {
        Ok(body) if !body.errors.is_empty() => Error::Api {
            status: raw.status.as_u16(),
            errors: body.errors,
            messages: body.messages,
        },
        _ => Error::HttpStatus {
            status: raw.status.as_u16(),
            reason: raw.reason().to_string(),
            body: raw.body.clone(),
            diagnostics,
        },
    }
}

fn deserialization_error(raw: &RawResponse, source: serde_json::Error) -> Error {
    tracing::error!(
        "Failed to parse response from {} {}: {} | body: {}",
        raw.method,
        raw.url,
        source,
        truncate_body(&raw.body)
    );
    Error::Deserialization {
        source,
        body: raw.body.clone(),
    }
}

fn describe(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
