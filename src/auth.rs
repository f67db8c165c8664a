//! Bearer-token authentication for the HTTP layer.
//!
//! Claims are decoded into [`AuthenticatedUser`] by a `FromRequest`
//! extractor; handlers that take the extractor as a parameter reject
//! unauthenticated callers before the service layer runs.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error as ActixError, FromRequest, HttpRequest, web};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::domain::auth::AuthenticatedUser;

/// Secret used to verify bearer tokens, shared as app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let secret = match req.app_data::<web::Data<JwtSecret>>() {
            Some(secret) => secret,
            None => return ready(Err(ErrorUnauthorized("authentication is not configured"))),
        };

        let token = match bearer_token(req) {
            Some(token) => token,
            None => return ready(Err(ErrorUnauthorized("missing bearer token"))),
        };

        let claims = decode::<AuthenticatedUser>(
            token,
            &DecodingKey::from_secret(secret.0.as_bytes()),
            &Validation::new(Algorithm::HS256),
        );

        ready(match claims {
            Ok(data) => Ok(data.claims),
            Err(e) => {
                log::debug!("Bearer token rejected: {e}");
                Err(ErrorUnauthorized("invalid bearer token"))
            }
        })
    }
}
