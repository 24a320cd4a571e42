use actix_web::{post, web};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::token::TokenService;
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{NewUser, RegisterRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::FieldErrors;

#[derive(Serialize)]
pub struct Response {
    pub user: entity::user::Model,
    pub token: String,
}

fn validate(body: &RegisterRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if errors.require("name", &body.name) {
        errors.max_len("name", &body.name, 255);
    }
    errors.require_email("email", &body.email);
    errors.max_len("email", &body.email, 255);
    if errors.require("password", &body.password) {
        errors.min_len("password", &body.password, 8);
        errors.confirmed("password", &body.password, &body.password_confirmation);
    }
    errors.finish()
}

#[post("")]
async fn register(
    db: web::Data<Arc<PostgresService>>,
    tokens: web::Data<TokenService>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<Response> {
    validate(&body)?;

    let password_hash = hash_password(&body.password)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;

    let user = db
        .create_user(NewUser {
            name: body.name.clone(),
            email: body.email.clone(),
            password_hash,
            definers: body.definers.clone(),
        })
        .await?;

    let pair = tokens.issue(user.id)?;

    Ok(ApiResponse::Created(Response {
        user,
        token: pair.token,
    }))
}
