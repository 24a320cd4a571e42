use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::dev::{Payload, ServiceRequest};
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::user::Model as UserModel;

use crate::auth::pipeline::{self, Tier};
use crate::auth::token::TokenService;
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;

/// The account resolved by a bearer guard, handed to route handlers as
/// an explicit argument rather than ambient request state.
pub struct AuthedUser(pub UserModel);

impl FromRequest for AuthedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserModel>()
                .cloned()
                .map(AuthedUser)
                .ok_or(AppError::Unauthenticated),
        )
    }
}

fn app_state(
    req: &ServiceRequest,
) -> Result<(web::Data<Arc<PostgresService>>, web::Data<TokenService>), AppError> {
    let db = req
        .app_data::<web::Data<Arc<PostgresService>>>()
        .cloned()
        .ok_or_else(|| AppError::Internal("database handle not configured".to_string()))?;
    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .cloned()
        .ok_or_else(|| AppError::Internal("token service not configured".to_string()))?;
    Ok((db, tokens))
}

async fn bearer_guard(
    req: ServiceRequest,
    credentials: BearerAuth,
    tier: Tier,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let (db, tokens) = match app_state(&req) {
        Ok(state) => state,
        Err(e) => return Err((e.into(), req)),
    };

    match pipeline::authorize(&db, &tokens, credentials.token(), tier).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(req)
        }
        Err(e) => Err((e.into(), req)),
    }
}

pub async fn require_user(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    bearer_guard(req, credentials, Tier::User).await
}

pub async fn require_team(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    bearer_guard(req, credentials, Tier::Team).await
}

pub async fn require_super(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    bearer_guard(req, credentials, Tier::Super).await
}

/// Guard for the refresh route only: the presented bearer token must be
/// the refresh half of a pair.
pub async fn require_refresh(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let (db, tokens) = match app_state(&req) {
        Ok(state) => state,
        Err(e) => return Err((e.into(), req)),
    };

    match pipeline::authorize_refresh(&db, &tokens, credentials.token()).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(req)
        }
        Err(e) => Err((e.into(), req)),
    }
}
