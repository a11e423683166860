use std::fmt;

use serde::{Deserialize, Serialize};

/// Access and refresh credentials for one authenticated session.
///
/// The two are always issued together by the backend, and the pair is
/// replaced wholesale on every successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    #[serde(rename = "accessCredential")]
    pub access: String,
    #[serde(rename = "refreshCredential")]
    pub refresh: String,
}

impl CredentialPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }

    /// Builds the replacement pair after a successful refresh.
    ///
    /// The backend may rotate the refresh credential; when the grant omits
    /// one, the previously stored refresh credential stays valid.
    pub fn renewed(grant: CredentialGrant, previous_refresh: &str) -> Self {
        Self {
            access: grant.access_credential,
            refresh: grant
                .refresh_credential
                .unwrap_or_else(|| previous_refresh.to_string()),
        }
    }
}

impl fmt::Display for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"accessCredential\":\"[REDACTED]\",\"refreshCredential\":\"[REDACTED]\"}}"
        )
    }
}

/// Successful body of `POST /auth/refresh`.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialGrant {
    #[serde(rename = "accessCredential")]
    pub access_credential: String,
    #[serde(rename = "refreshCredential")]
    pub refresh_credential: Option<String>,
}

/// Request body of `POST /auth/refresh`.
#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshCredential")]
    pub refresh_credential: String,
}
