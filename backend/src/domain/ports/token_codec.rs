//! Port for issuing and verifying bearer tokens.

use crate::domain::TokenSubject;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenCodecError {
        /// Signing a token failed.
        Issue { message: String } => "token issuance failed: {message}",
        /// The token has expired.
        Expired => "token expired",
        /// The token is malformed, tampered with or otherwise unusable.
        Invalid { message: String } => "invalid token: {message}",
    }
}

/// Signed token handed to clients after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
}

impl IssuedToken {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    fn issue(&self, subject: &TokenSubject) -> Result<IssuedToken, TokenCodecError>;

    fn verify(&self, token: &str) -> Result<TokenSubject, TokenCodecError>;
}
