use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::application::models::auth::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
use crate::constants::{AUTH_LOGIN_PATH, AUTH_ME_PATH, AUTH_REGISTER_PATH};
use crate::error::ApiError;
use crate::transport::api_client::ApiClient;

/// Account lifecycle operations.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticates with email and password and installs the issued
    /// credential pair into the session.
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError>;

    /// Creates an account; the backend returns credentials immediately so
    /// the new user is signed in.
    async fn register(&self, name: &str, email: &str, password: &str)
        -> Result<UserProfile, ApiError>;

    /// Profile of the currently authenticated user.
    async fn me(&self) -> Result<UserProfile, ApiError>;

    /// Drops the session's credentials from storage and memory.
    async fn logout(&self) -> Result<(), ApiError>;
}

pub struct AuthServiceImpl {
    client: Arc<ApiClient>,
}

impl AuthServiceImpl {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        info!("Logging in {}", email);
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.client.post(AUTH_LOGIN_PATH, &request).await?;

        self.client.session().install(response.credential_pair())?;
        debug!("Login succeeded for user {}", response.user.id);
        Ok(response.user)
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, ApiError> {
        info!("Registering {}", email);
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.client.post(AUTH_REGISTER_PATH, &request).await?;

        self.client.session().install(response.credential_pair())?;
        debug!("Registration succeeded for user {}", response.user.id);
        Ok(response.user)
    }

    async fn me(&self) -> Result<UserProfile, ApiError> {
        self.client.get(AUTH_ME_PATH).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        info!("Logging out");
        self.client.session().clear()?;
        Ok(())
    }
}
