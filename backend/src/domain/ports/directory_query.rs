//! Driving port listing users of the opposite role.

use async_trait::async_trait;

use crate::domain::{Actor, Error, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Manager only. Employees who can receive feedback.
    async fn list_employees(&self, actor: &Actor) -> Result<Vec<User>, Error>;

    /// Employee only. Managers who can be asked for feedback.
    async fn list_managers(&self, actor: &Actor) -> Result<Vec<User>, Error>;
}
