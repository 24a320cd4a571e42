use actix_web::{post, web};

use crate::auth::middleware::AuthedUser;
use crate::auth::token::TokenService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::TokenPair;

// The guard on this scope only admits refresh-type tokens. The old
// refresh token is not blacklisted; it simply ages out.
#[post("")]
async fn refresh(user: AuthedUser, tokens: web::Data<TokenService>) -> ApiResult<TokenPair> {
    let pair = tokens.issue(user.0.id)?;
    Ok(ApiResponse::Ok(pair))
}
