//! Driving port for registration and login.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, RegistrationDetails, User};

use super::IssuedToken;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a new user. Fails with `Conflict` for a taken e-mail.
    async fn register(&self, details: RegistrationDetails) -> Result<User, Error>;

    /// Verify credentials and issue a bearer token. Unknown e-mail and wrong
    /// password fail identically with `Unauthorized`.
    async fn login(&self, credentials: LoginCredentials) -> Result<IssuedToken, Error>;
}
