use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::code::CodePurpose;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::password::hash_password;
use crate::utils::validate::FieldErrors;

#[derive(Serialize, Deserialize)]
pub struct Request {
    pub email: String,
    pub code: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Serialize)]
pub struct Response {
    pub message: String,
}

#[post("")]
async fn reset(db: web::Data<Arc<PostgresService>>, body: web::Json<Request>) -> ApiResult<Response> {
    let mut errors = FieldErrors::new();
    errors.require_email("email", &body.email);
    errors.require("code", &body.code);
    if errors.require("password", &body.password) {
        errors.min_len("password", &body.password, 8);
        errors.confirmed("password", &body.password, &body.password_confirmation);
    }
    errors.finish()?;

    // An unknown email fails the same way as a bad code.
    let user = db
        .find_user_by_email(&body.email)
        .await?
        .ok_or(AppError::InvalidCode)?;

    db.consume_code(user.id, CodePurpose::PasswordReset, &body.code)
        .await?;

    let password_hash = hash_password(&body.password)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
    db.set_password_hash(user.id, password_hash).await?;

    Ok(ApiResponse::Ok(Response {
        message: "The password has been reset.".to_string(),
    }))
}
