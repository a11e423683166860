use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::constants::FALLBACK_ERROR_MESSAGE;
use crate::error::ApiError;

/// Thin wrapper over [`reqwest::Client`] bound to a single backend origin.
///
/// Carries no session state; credential attachment and retry policy live in
/// [`crate::transport::api_client::ApiClient`].
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport for the given origin.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Origin (plus optional path prefix) of the backend API.
    /// * `timeout` - Per-request timeout in seconds.
    pub fn new(base_url: &str, timeout: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issues one HTTP call and returns the raw response.
    ///
    /// Status handling is deliberately left to the caller so the 401 branch
    /// can divert into the refresh protocol before the body is consumed.
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        bearer: Option<&str>,
        body: Option<&Value>,
        headers: &[(String, String)],
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("Sending {} request to {}", method, url);

        let mut request = self.client.request(method, &url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        debug!("Response status: {}", response.status());
        Ok(response)
    }
}

/// Maps a settled response to the caller's typed result.
///
/// 204 yields the type's empty value (deserialized from JSON `null`), other
/// 2xx parse the JSON body, and everything else becomes an [`ApiError::Status`]
/// carrying the backend's message when it sent one.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    if status == StatusCode::NO_CONTENT {
        return Ok(serde_json::from_value(Value::Null)?);
    }

    let body_text = response.text().await?;
    debug!("Response body: {}", body_text);

    if status.is_success() {
        Ok(serde_json::from_str(&body_text)?)
    } else {
        error!("API request failed. Status: {}, Body: {}", status, body_text);
        Err(ApiError::Status {
            status,
            message: extract_message(&body_text),
        })
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Conventional shapes are `{"message": "..."}` and `{"error": "..."}`; a
/// non-JSON body is passed through as-is.
pub(crate) fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        trimmed.to_string()
    }
}
