use serde::{Deserialize, Serialize};

use crate::session::credentials::CredentialPair;

/// Request body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body of `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful body of login and registration: the user plus a freshly issued
/// credential pair.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    #[serde(rename = "accessCredential")]
    pub access_credential: String,
    #[serde(rename = "refreshCredential")]
    pub refresh_credential: String,
}

impl AuthResponse {
    pub fn credential_pair(&self) -> CredentialPair {
        CredentialPair::new(&self.access_credential, &self.refresh_credential)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}
