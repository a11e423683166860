use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use reqwest::Method;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::constants::AUTH_REFRESH_PATH;
use crate::error::{RefreshError, StoreError};
use crate::session::credentials::{CredentialPair, CredentialGrant, RefreshRequest};
use crate::storage::credential_store::CredentialStore;
use crate::transport::http_client::{extract_message, HttpTransport};

/// Hook invoked when the session is lost for good.
///
/// The dashboard installs an implementation that navigates the browsing
/// context to the login route; tests record the call.
pub trait SessionObserver: Send + Sync {
    fn session_expired(&self, login_route: &str);
}

type SharedRefresh = Shared<BoxFuture<'static, Result<CredentialPair, RefreshError>>>;

/// Process-wide refresh coordination point.
///
/// `InFlight` holds the one outstanding refresh; every caller that observes
/// it awaits the same shared outcome instead of issuing a second call.
enum RefreshState {
    Idle,
    InFlight(SharedRefresh),
}

/// Owns the session's credential pair and the refresh protocol.
///
/// The durable store is mirrored into memory at construction so the access
/// credential can be read without touching the filesystem on every request.
/// Writes go to the store first, then the mirror, so a renewed credential is
/// visible to the very next request once a refresh resolves.
pub struct SessionManager {
    config: Arc<Config>,
    transport: Arc<HttpTransport>,
    store: Arc<dyn CredentialStore>,
    current: Mutex<Option<CredentialPair>>,
    refresh_state: Mutex<RefreshState>,
    observer: Option<Arc<dyn SessionObserver>>,
}

impl SessionManager {
    pub fn new(
        config: Arc<Config>,
        transport: Arc<HttpTransport>,
        store: Arc<dyn CredentialStore>,
        observer: Option<Arc<dyn SessionObserver>>,
    ) -> Self {
        let current = store.load().unwrap_or_else(|e| {
            warn!("Failed to load stored credentials, starting unauthenticated: {e}");
            None
        });

        Self {
            config,
            transport,
            store,
            current: Mutex::new(current),
            refresh_state: Mutex::new(RefreshState::Idle),
            observer,
        }
    }

    /// Current credential pair, if the session is authenticated.
    pub fn current(&self) -> Option<CredentialPair> {
        self.current.lock().unwrap().clone()
    }

    /// Access credential to attach as a bearer header, if any.
    pub fn access_credential(&self) -> Option<String> {
        self.current.lock().unwrap().as_ref().map(|p| p.access.clone())
    }

    /// Installs a freshly issued pair, e.g. after login or registration.
    pub fn install(&self, pair: CredentialPair) -> Result<(), StoreError> {
        self.store.save(&pair)?;
        *self.current.lock().unwrap() = Some(pair);
        Ok(())
    }

    /// Drops the session from storage and memory. Used by logout; does not
    /// signal the observer.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.clear()?;
        *self.current.lock().unwrap() = None;
        Ok(())
    }

    /// Obtains a renewed credential pair, collapsing concurrent callers into
    /// a single network call.
    ///
    /// The first caller to arrive while the state is `Idle` owns the refresh;
    /// everyone arriving while it is in flight awaits the same shared future.
    /// On failure the credentials are purged and the observer is signalled,
    /// and every waiter sees the same error.
    pub async fn refresh(self: &Arc<Self>) -> Result<CredentialPair, RefreshError> {
        let shared = {
            let mut state = self.refresh_state.lock().unwrap();
            match &*state {
                RefreshState::InFlight(shared) => {
                    debug!("Refresh already in flight, awaiting shared outcome");
                    shared.clone()
                }
                RefreshState::Idle => {
                    debug!("Starting credential refresh");
                    let shared = Arc::clone(self).run_refresh().boxed().shared();
                    *state = RefreshState::InFlight(shared.clone());
                    shared
                }
            }
        };

        shared.await
    }

    async fn run_refresh(self: Arc<Self>) -> Result<CredentialPair, RefreshError> {
        let outcome = self.execute_refresh().await;

        // The marker is cleared the instant the call settles, regardless of
        // how many callers were waiting on it.
        *self.refresh_state.lock().unwrap() = RefreshState::Idle;

        match &outcome {
            Ok(_) => info!("Credential refresh succeeded"),
            Err(e) => {
                warn!("Credential refresh failed, session is unrecoverable: {e}");
                self.purge();
                self.notify_expired();
            }
        }

        outcome
    }

    async fn execute_refresh(&self) -> Result<CredentialPair, RefreshError> {
        let previous = self
            .current()
            .ok_or(RefreshError::MissingRefreshCredential)?;

        let request = RefreshRequest {
            refresh_credential: previous.refresh.clone(),
        };
        let body = serde_json::to_value(&request).map_err(|e| RefreshError::Wire(e.to_string()))?;

        let response = self
            .transport
            .execute(Method::POST, AUTH_REFRESH_PATH, None, Some(&body), &[])
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(RefreshError::Rejected {
                status: status.as_u16(),
                message: extract_message(&body_text),
            });
        }

        let grant: CredentialGrant =
            serde_json::from_str(&body_text).map_err(|e| RefreshError::Wire(e.to_string()))?;
        let renewed = CredentialPair::renewed(grant, &previous.refresh);

        // Persist before any waiter retries, so the next request reads the
        // renewed credential and never a stale one.
        self.store
            .save(&renewed)
            .map_err(|e| RefreshError::Storage(e.to_string()))?;
        *self.current.lock().unwrap() = Some(renewed.clone());

        Ok(renewed)
    }

    fn purge(&self) {
        if let Err(e) = self.store.clear() {
            error!("Failed to clear credential storage: {e}");
        }
        *self.current.lock().unwrap() = None;
    }

    fn notify_expired(&self) {
        if let Some(observer) = &self.observer {
            observer.session_expired(&self.config.session.login_route);
        }
    }
}
