//! Caller identity extraction
//!
//! Session and token handling live in the fronting auth layer; by the time
//! a request reaches this service the authenticated user id is carried in
//! the `X-User-Id` header. Requests without a parseable id are rejected
//! before any handler runs.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures::future::{Ready, ready};
use uuid::Uuid;

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The authenticated caller of the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: Uuid,
}

impl FromRequest for CallerIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok());

        ready(match parsed {
            Some(user_id) => Ok(CallerIdentity { user_id }),
            None => Err(actix_web::error::ErrorUnauthorized(
                "Missing or invalid X-User-Id header",
            )),
        })
    }
}
