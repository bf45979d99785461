use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::common::password;
use crate::domains::auth::data::LoginData;
use crate::domains::auth::jwt::JwtService;
use crate::domains::auth::store::CredentialStore;

/// Authentication failures.
///
/// `InvalidCredentials` carries one opaque message for both unknown
/// usernames and wrong passwords; logs distinguish them, responses
/// must not.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Verifies username/password pairs and issues tokens on success.
pub struct AuthenticationService {
    credentials: Arc<dyn CredentialStore>,
    jwt: Arc<JwtService>,
}

impl AuthenticationService {
    pub fn new(credentials: Arc<dyn CredentialStore>, jwt: Arc<JwtService>) -> Self {
        Self { credentials, jwt }
    }

    /// Single credential lookup, one-way hash check, token issuance.
    /// A lookup failure is a definitive authentication failure; there
    /// are no retries.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<LoginData, AuthError> {
        info!("Authenticating user: {}", username);

        let user = self
            .credentials
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                error!("Authentication failed: user not found with username: {}", username);
                AuthError::InvalidCredentials
            })?;

        if !password::verify(password, &user.password_hash) {
            error!("Authentication failed: invalid password for username: {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt.issue(&user.username, &user.role_name)?;
        info!(
            "Successfully authenticated user: {} with role: {}",
            user.username, user.role_name
        );

        Ok(LoginData::new(token, user.username, user.role_name))
    }
}
