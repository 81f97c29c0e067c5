//! HS256 JSON Web Token implementation of the `TokenCodec` port.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{IssuedToken, TokenCodec, TokenCodecError};
use crate::domain::{Role, TokenSubject, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: i64,
    email: String,
    role: Role,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared secret.
///
/// Expiry is checked against the system clock with the default 60 second
/// leeway; `iat` and `exp` are stamped from the injected clock.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenCodec {
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
            clock,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, subject: &TokenSubject) -> Result<IssuedToken, TokenCodecError> {
        let now = self.clock.utc();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenCodecError::issue("token expiry is out of range"))?;
        let claims = Claims {
            user_id: subject.user_id.get(),
            email: subject.email.clone(),
            role: subject.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map(IssuedToken::bearer)
            .map_err(|err| TokenCodecError::issue(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenSubject, TokenCodecError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(
            |err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenCodecError::expired(),
                _ => TokenCodecError::invalid(err.to_string()),
            },
        )?;
        let claims = data.claims;
        Ok(TokenSubject {
            user_id: UserId::new(claims.user_id),
            email: claims.email,
            role: claims.role,
        })
    }
}
