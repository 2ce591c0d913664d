use async_trait::async_trait;

use crate::config::AuthConfig;

/// Identity attached to a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser {
    pub user_id: String,
    pub email: String,
}

/// Seam for the identity provider. The service only ever sees bearer tokens;
/// how they are validated is the adapter's concern.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Returns the identity behind a token, or None if it is rejected
    async fn verify(&self, token: &str) -> Option<VerifiedUser>;
}

/// Verifier that accepts a single service token from configuration.
/// With no token configured, every request is rejected.
pub struct StaticTokenVerifier {
    token: Option<String>,
    user_id: String,
    email: String,
}

impl StaticTokenVerifier {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            token: config.service_token.clone(),
            user_id: config.user_id.clone(),
            email: config.email.clone(),
        }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Option<VerifiedUser> {
        match &self.token {
            Some(expected) if expected == token => Some(VerifiedUser {
                user_id: self.user_id.clone(),
                email: self.email.clone(),
            }),
            _ => None,
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
/// Anything other than exactly two space-separated parts is malformed.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}
