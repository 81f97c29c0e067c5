//! Driving port resolving bearer tokens into actors.

use async_trait::async_trait;

use crate::domain::{Actor, Error, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentUserQuery: Send + Sync {
    /// Verify `token` and load the user it names from the identity store.
    ///
    /// Any failure, including a token for a user that no longer exists, is
    /// reported as `Unauthorized`.
    async fn resolve_actor(&self, token: &str) -> Result<Actor, Error>;

    /// Load the stored profile of `actor`.
    async fn current_user(&self, actor: &Actor) -> Result<User, Error>;
}
