use actix_web::{patch, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::middleware::AuthedUser;
use crate::db::postgres_service::PostgresService;
use crate::types::code::CodePurpose;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::validate::FieldErrors;

#[derive(Serialize, Deserialize)]
pub struct Request {
    pub code: String,
}

#[derive(Serialize)]
pub struct Response {
    pub message: String,
}

#[patch("")]
async fn confirm(
    user: AuthedUser,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<Request>,
) -> ApiResult<Response> {
    let mut errors = FieldErrors::new();
    errors.require("code", &body.code);
    errors.finish()?;

    db.consume_code(user.0.id, CodePurpose::EmailValidate, &body.code)
        .await?;
    db.set_email_verified(user.0.id).await?;

    Ok(ApiResponse::Ok(Response {
        message: "The email has been verified successfully.".to_string(),
    }))
}
