use actix_web::post;
use serde::Serialize;

use crate::auth::middleware::AuthedUser;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize)]
pub struct Response {
    pub user: entity::user::Model,
}

#[post("")]
async fn me(user: AuthedUser) -> ApiResult<Response> {
    Ok(ApiResponse::Ok(Response { user: user.0 }))
}
