//! Account service: registration, login and bearer-token resolution.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::service_support::map_user_repository_error;
use crate::domain::ports::{
    AccountCommand, CurrentUserQuery, IssuedToken, PasswordHasher, PasswordHasherError,
    TokenCodec, TokenCodecError, UserRepository,
};
use crate::domain::{
    Actor, Error, LoginCredentials, NewUserAccount, RegistrationDetails, TokenSubject, User,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

fn map_token_error(error: TokenCodecError) -> Error {
    match error {
        TokenCodecError::Issue { message } => {
            Error::internal(format!("token issuance failed: {message}"))
        }
        TokenCodecError::Expired => Error::unauthorized("token expired"),
        TokenCodecError::Invalid { .. } => Error::unauthorized("invalid token"),
    }
}

/// Implements [`AccountCommand`] and [`CurrentUserQuery`] over the identity
/// store, a password hasher and a token codec.
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
}

impl<U> AccountService<U> {
    pub fn new(
        users: Arc<U>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, details: RegistrationDetails) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(details.password())
            .map_err(map_hasher_error)?;
        let user = self
            .users
            .insert(NewUserAccount {
                email: details.email().clone(),
                role: details.role(),
                password_hash,
            })
            .await
            .map_err(map_user_repository_error)?;
        info!(user_id = %user.id(), role = %user.role(), "registered user");
        Ok(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<IssuedToken, Error> {
        let Some(account) = self
            .users
            .find_account_by_email(credentials.email())
            .await
            .map_err(map_user_repository_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .map_err(map_hasher_error)?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.tokens
            .issue(&TokenSubject::from(account.user()))
            .map_err(map_token_error)
    }
}

#[async_trait]
impl<U> CurrentUserQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn resolve_actor(&self, token: &str) -> Result<Actor, Error> {
        let subject = self.tokens.verify(token).map_err(map_token_error)?;
        let user = self
            .users
            .find_by_id(subject.user_id)
            .await
            .map_err(map_user_repository_error)?;
        match user {
            Some(user) => Ok(Actor::from(user)),
            None => {
                warn!(user_id = %subject.user_id, "token names an unknown user");
                Err(Error::unauthorized("invalid token"))
            }
        }
    }

    async fn current_user(&self, actor: &Actor) -> Result<User, Error> {
        self.users
            .find_by_id(actor.id())
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::unauthorized("invalid token"))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
