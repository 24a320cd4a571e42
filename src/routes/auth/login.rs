use actix_web::{post, web};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::credentials::verify_credentials;
use crate::auth::token::TokenService;
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::TokenPair;
use crate::types::user::LoginRequest;
use crate::utils::validate::FieldErrors;

#[derive(Serialize)]
pub struct Response {
    pub user: entity::user::Model,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

fn validate(body: &LoginRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.require_email("email", &body.email);
    if errors.require("password", &body.password) {
        errors.min_len("password", &body.password, 8);
    }
    errors.finish()
}

#[post("")]
async fn login(
    db: web::Data<Arc<PostgresService>>,
    tokens: web::Data<TokenService>,
    body: web::Json<LoginRequest>,
) -> ApiResult<Response> {
    validate(&body)?;

    let user = verify_credentials(&db, &body.email, &body.password).await?;

    // Correct credentials on a disabled account still cannot log in.
    if !user.enabled {
        return Err(AppError::AccountDisabled);
    }

    let pair = tokens.issue(user.id)?;

    Ok(ApiResponse::Ok(Response { user, tokens: pair }))
}
