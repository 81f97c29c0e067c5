//! Role-scoped user directory.

use std::sync::Arc;

use async_trait::async_trait;

use super::service_support::map_user_repository_error;
use crate::domain::ports::{DirectoryQuery, UserRepository};
use crate::domain::{Actor, Error, Role, User};

/// Lists users of the opposite role to the caller.
#[derive(Clone)]
pub struct DirectoryService<U> {
    users: Arc<U>,
}

impl<U> DirectoryService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> DirectoryService<U>
where
    U: UserRepository,
{
    async fn list(&self, actor: &Actor, required: Role, listed: Role) -> Result<Vec<User>, Error> {
        actor.require_role(required)?;
        self.users
            .list_by_role(listed)
            .await
            .map_err(map_user_repository_error)
    }
}

#[async_trait]
impl<U> DirectoryQuery for DirectoryService<U>
where
    U: UserRepository,
{
    async fn list_employees(&self, actor: &Actor) -> Result<Vec<User>, Error> {
        self.list(actor, Role::Manager, Role::Employee).await
    }

    async fn list_managers(&self, actor: &Actor) -> Result<Vec<User>, Error> {
        self.list(actor, Role::Employee, Role::Manager).await
    }
}
