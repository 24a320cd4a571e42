use actix_web::{post, web};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::middleware::AuthedUser;
use crate::config::config;
use crate::db::postgres_service::PostgresService;
use crate::types::code::CodePurpose;
use crate::types::mail::SendEmail;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::mail::send_email;

#[derive(Serialize)]
pub struct Response {
    pub message: String,
}

#[post("")]
async fn request_code(
    user: AuthedUser,
    db: web::Data<Arc<PostgresService>>,
) -> ApiResult<Response> {
    let code = db
        .issue_code(user.0.id, CodePurpose::EmailValidate)
        .await?;

    // The response does not wait on delivery, but a dispatch failure
    // is logged rather than dropped.
    let to = user.0.email.clone();
    tokio::spawn(async move {
        let result = send_email(SendEmail {
            from: config().mail.from.clone(),
            to: vec![to],
            subject: "Email verification code".to_string(),
            text: Some(format!("Your verification code is: {code}")),
            ..Default::default()
        })
        .await;
        if let Err(e) = result {
            log::error!("failed to send verification email: {e}");
        }
    });

    Ok(ApiResponse::Ok(Response {
        message: "A validation code has been sent to your email.".to_string(),
    }))
}
