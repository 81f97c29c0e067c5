//! Port for the identity store.

use async_trait::async_trait;

use crate::domain::{NewUserAccount, Role, User, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity store adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The e-mail address is already registered.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Read and write access to registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return the stored user.
    async fn insert(&self, account: NewUserAccount) -> Result<User, UserRepositoryError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Find an account, including its password hash, by normalised e-mail.
    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, UserRepositoryError>;

    /// List users holding `role`, ordered by id.
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserRepositoryError>;
}
