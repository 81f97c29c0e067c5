//! Bearer-token extractor resolving the calling [`Actor`].
//!
//! Handlers that take [`CurrentActor`] reject requests without a valid
//! `Authorization: Bearer <token>` header with `401 Unauthorized`.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Actor, Error};

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// The authenticated caller of the current request.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

impl CurrentActor {
    pub fn into_inner(self) -> Actor {
        self.0
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively.
pub(crate) fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.is_empty()).then_some(token)
}

impl FromRequest for CurrentActor {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .map(str::to_owned);

        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let token = token.ok_or_else(|| Error::unauthorized("bearer token required"))?;
            state
                .current_user
                .resolve_actor(&token)
                .await
                .map(CurrentActor)
        })
    }
}
