//! Response envelope shared by both upstream APIs.
//!
//! Both providers answer with either a payload or an `error` member (an
//! object, a plain string or null; the stock API sometimes answers with a
//! bare `message`). Any `error` member marks the call as failed. The envelope is decoded once
//! into a tagged variant instead of probing fields on a raw JSON value.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::FetchError;

const MAX_BODY_IN_ERROR: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Failure { error: serde_json::Value },
    Message { message: String },
    Success(T),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

impl ApiErrorBody {
    /// Best human readable description the provider gave us.
    pub fn describe(&self) -> String {
        let text = self
            .message
            .as_deref()
            .or(self.info.as_deref())
            .or(self.kind.as_deref())
            .unwrap_or("unknown error");
        match &self.code {
            Some(code) => format!("{} (code {})", text, code),
            None => text.to_string(),
        }
    }
}

/// Description of whatever the provider put under `error`.
fn describe_error(error: serde_json::Value) -> String {
    match error {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => "unknown error".to_string(),
        serde_json::Value::Object(map) => {
            let object = serde_json::Value::Object(map);
            match serde_json::from_value::<ApiErrorBody>(object.clone()) {
                Ok(body) => body.describe(),
                Err(_) => object.to_string(),
            }
        }
        other => other.to_string(),
    }
}

/// Decode a response body and classify it.
///
/// Error payloads win over the HTTP status so the provider's own message ends
/// up in the log; a success-shaped body with a non-2xx status is still an
/// error.
pub fn classify_response<T: DeserializeOwned>(
    api: &'static str,
    status: u16,
    body: &str,
) -> Result<T, FetchError> {
    let ok_status = (200..300).contains(&status);

    let envelope: ApiEnvelope<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(source) if ok_status => {
            // The untagged envelope hides field level errors, decode the
            // payload alone to surface them
            let source = match serde_json::from_str::<T>(body) {
                Err(field_error) => field_error,
                Ok(_) => source,
            };
            return Err(FetchError::Decode { api, source });
        }
        Err(_) => {
            return Err(FetchError::Status {
                api,
                status,
                message: truncate(body),
            })
        }
    };

    match envelope {
        ApiEnvelope::Failure { error } => Err(FetchError::Api {
            api,
            message: describe_error(error),
        }),
        ApiEnvelope::Message { message } => Err(FetchError::Api { api, message }),
        ApiEnvelope::Success(_) if !ok_status => Err(FetchError::Status {
            api,
            status,
            message: truncate(body),
        }),
        ApiEnvelope::Success(payload) => Ok(payload),
    }
}

fn truncate(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_BODY_IN_ERROR) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
