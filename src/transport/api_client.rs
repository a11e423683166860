use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::constants::AUTH_PATH_PREFIX;
use crate::error::ApiError;
use crate::session::manager::{SessionManager, SessionObserver};
use crate::storage::credential_store::CredentialStore;
use crate::transport::http_client::{handle_response, HttpTransport};

/// One HTTP call as issued (or re-issued) by the client.
///
/// The body is serialized up front so a retry re-sends exactly the same
/// payload. `is_retry` bounds the refresh recovery to a single extra attempt.
#[derive(Debug, Clone)]
struct RequestAttempt {
    method: Method,
    endpoint: String,
    body: Option<Value>,
    headers: Vec<(String, String)>,
    is_retry: bool,
}

impl RequestAttempt {
    fn new<B: Serialize + ?Sized>(
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        headers: &[(String, String)],
    ) -> Result<Self, ApiError> {
        let body = match body {
            Some(b) => Some(serde_json::to_value(b)?),
            None => None,
        };
        Ok(Self {
            method,
            endpoint: endpoint.to_string(),
            body,
            headers: headers.to_vec(),
            is_retry: false,
        })
    }

    fn into_retry(self) -> Self {
        Self {
            is_retry: true,
            ..self
        }
    }
}

fn is_auth_endpoint(endpoint: &str) -> bool {
    endpoint.starts_with(AUTH_PATH_PREFIX)
}

/// Session-aware client for the Gala backend.
///
/// Attaches the current access credential to every request and recovers from
/// credential expiry transparently: a 401 on a non-auth endpoint triggers the
/// session's single-flight refresh, then the original request is re-issued
/// exactly once. Anything still failing after that is surfaced to the caller.
pub struct ApiClient {
    transport: Arc<HttpTransport>,
    session: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(
        config: Arc<Config>,
        store: Arc<dyn CredentialStore>,
        observer: Option<Arc<dyn SessionObserver>>,
    ) -> Result<Self, ApiError> {
        let transport = Arc::new(HttpTransport::new(
            &config.rest_api.base_url,
            config.rest_api.timeout,
        )?);
        let session = Arc::new(SessionManager::new(
            config,
            Arc::clone(&transport),
            store,
            observer,
        ));

        Ok(Self { transport, session })
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Performs an authenticated JSON request.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method.
    /// * `endpoint` - Path relative to the configured origin.
    /// * `body` - Optional JSON-serializable request body.
    /// * `headers` - Extra headers forwarded verbatim.
    ///
    /// # Returns
    ///
    /// The parsed response body; a 204 response yields the type's empty
    /// value.
    #[instrument(skip(self, body, headers))]
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        headers: &[(String, String)],
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let attempt = RequestAttempt::new(method, endpoint, body, headers)?;

        let response = self.send(&attempt).await?;
        if response.status() != StatusCode::UNAUTHORIZED
            || attempt.is_retry
            || is_auth_endpoint(&attempt.endpoint)
        {
            return handle_response(response).await;
        }

        // Recovery is an explicit second step, never recursion: refresh the
        // session once, then re-issue the identical request once.
        debug!("Access credential rejected for {}, refreshing", attempt.endpoint);
        if let Err(e) = self.session.refresh().await {
            warn!("Session refresh failed for {}: {e}", attempt.endpoint);
            return Err(e.into());
        }

        let retry = attempt.into_retry();
        let response = self.send(&retry).await?;
        handle_response(response).await
    }

    async fn send(&self, attempt: &RequestAttempt) -> Result<reqwest::Response, ApiError> {
        let bearer = self.session.access_credential();
        self.transport
            .execute(
                attempt.method.clone(),
                &attempt.endpoint,
                bearer.as_deref(),
                attempt.body.as_ref(),
                &attempt.headers,
            )
            .await
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, endpoint, None, &[]).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, Some(body), &[]).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, Some(body), &[]).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::DELETE, endpoint, None, &[])
            .await
    }
}
