use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::config;
use crate::db::postgres_service::PostgresService;
use crate::types::code::CodePurpose;
use crate::types::mail::SendEmail;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::mail::send_email;
use crate::utils::validate::FieldErrors;

#[derive(Serialize, Deserialize)]
pub struct Request {
    pub email: String,
}

#[derive(Serialize)]
pub struct Response {
    pub message: String,
}

// Always answers 200 for a well-formed email so the response does not
// reveal whether the address is registered.
#[post("")]
async fn forgot(db: web::Data<Arc<PostgresService>>, body: web::Json<Request>) -> ApiResult<Response> {
    let mut errors = FieldErrors::new();
    errors.require_email("email", &body.email);
    errors.finish()?;

    if let Some(user) = db.find_user_by_email(&body.email).await? {
        let code = db.issue_code(user.id, CodePurpose::PasswordReset).await?;

        let to = user.email.clone();
        tokio::spawn(async move {
            let result = send_email(SendEmail {
                from: config().mail.from.clone(),
                to: vec![to],
                subject: "Password reset code".to_string(),
                text: Some(format!("Your password reset code is: {code}")),
                ..Default::default()
            })
            .await;
            if let Err(e) = result {
                log::error!("failed to send password reset email: {e}");
            }
        });
    }

    Ok(ApiResponse::Ok(Response {
        message: "If the email is registered, a reset code has been sent.".to_string(),
    }))
}
