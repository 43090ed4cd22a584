//! Server-side session: the claims carried by the identity token.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::role::Role;
use crate::models::config::ServerConfig;

/// Claims of the token issued by the external auth service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Owner profile backing a `HostelOwner` session.
    #[serde(default)]
    pub profile_id: Option<i32>,
    pub exp: u64,
}

impl AuthenticatedUser {
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("Server configuration is not registered");
            return ready(Err(ErrorInternalServerError("configuration missing")));
        };

        let token = bearer_token(req).or_else(|| {
            req.get_identity()
                .ok()
                .and_then(|identity| identity.id().ok())
        });

        let Some(token) = token else {
            return ready(Err(ErrorUnauthorized("not signed in")));
        };

        match AuthenticatedUser::from_jwt(&token, &config.secret) {
            Ok(user) => ready(Ok(user)),
            Err(err) => {
                log::warn!("Rejected session token: {err}");
                ready(Err(ErrorUnauthorized("invalid session")))
            }
        }
    }
}
