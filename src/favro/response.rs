//! Normalization of non-2xx responses into [`FavroError`]

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{FavroError, FieldError};

/// Longest raw body kept as an error message when the body is not JSON
const MAX_RAW_MESSAGE_LEN: usize = 300;

/// Map a non-success status and its body to the error taxonomy
pub fn map_error_response(status: u16, body: &str, retry_after: Option<Duration>) -> FavroError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let message = extract_message(parsed.as_ref(), body, status);

    match status {
        400 | 422 => FavroError::ValidationFailed {
            status: Some(status),
            message,
            fields: parsed.as_ref().map(extract_field_errors).unwrap_or_default(),
        },
        401 => FavroError::Unauthenticated {
            status: Some(status),
            message,
        },
        403 => FavroError::Forbidden { status, message },
        404 => FavroError::NotFound {
            status: Some(status),
            message,
        },
        429 => FavroError::RateLimited {
            status,
            message,
            retry_after,
        },
        _ => FavroError::ServerError { status, message },
    }
}

/// Remote message: a JSON `message`/`error` field, else the raw body, else the reason phrase
fn extract_message(parsed: Option<&Value>, body: &str, status: u16) -> String {
    let from_json = parsed.and_then(|json| {
        ["message", "error", "errorMessage"]
            .iter()
            .find_map(|key| json.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    });
    if let Some(message) = from_json.filter(|m| !m.trim().is_empty()) {
        return message;
    }

    let raw = body.trim();
    if !raw.is_empty() && parsed.is_none() {
        return raw.chars().take(MAX_RAW_MESSAGE_LEN).collect();
    }

    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unexpected response")
        .to_string()
}

/// Field messages from `errors`, accepted as a list of `{field|param, message}`
/// objects or as a `{field: message | [messages]}` map
fn extract_field_errors(json: &Value) -> Vec<FieldError> {
    match json.get("errors") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                let field = item
                    .get("field")
                    .or_else(|| item.get("param"))
                    .and_then(Value::as_str)?;
                let message = item
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("invalid");
                Some(FieldError {
                    field: field.to_string(),
                    message: message.to_string(),
                })
            })
            .collect(),
        Some(Value::Object(map)) => map
            .iter()
            .flat_map(|(field, value)| {
                let messages: Vec<String> = match value {
                    Value::String(s) => vec![s.clone()],
                    Value::Array(list) => list
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect(),
                    other => vec![other.to_string()],
                };
                messages.into_iter().map(move |message| FieldError {
                    field: field.clone(),
                    message,
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Parse `Retry-After` as delta-seconds or as an HTTP date
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    let remaining = (at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
    Some(remaining)
}
