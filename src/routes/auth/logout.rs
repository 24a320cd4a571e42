use actix_web::post;
use serde::Serialize;

use crate::auth::middleware::AuthedUser;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize)]
pub struct Response {
    pub message: String,
}

// Tokens are stateless; logout acknowledges and the client discards
// its pair. The tokens age out on their own TTLs.
#[post("")]
async fn logout(_user: AuthedUser) -> ApiResult<Response> {
    Ok(ApiResponse::Ok(Response {
        message: "Successfully logged out".to_string(),
    }))
}
