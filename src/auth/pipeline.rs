use entity::user::Model as UserModel;

use crate::auth::token::TokenService;
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::token::TokenKind;

/// Authorization level a route demands. Team and Super both imply the
/// enabled check of the base User tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    User,
    Team,
    Super,
}

pub fn check_enabled(user: &UserModel) -> Result<(), AppError> {
    if !user.enabled {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn check_team(user: &UserModel) -> Result<(), AppError> {
    if !user.team {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn check_superuser(user: &UserModel) -> Result<(), AppError> {
    if !user.superuser {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Resolve an access token to its account. Expiry surfaces distinctly
/// as `TokenExpired`; every other token problem, including a subject
/// that no longer resolves, collapses to `Unauthenticated`.
pub async fn authenticate(
    db: &PostgresService,
    tokens: &TokenService,
    raw_token: &str,
) -> Result<UserModel, AppError> {
    let claims = tokens.verify_kind(raw_token, TokenKind::Access)?;
    db.find_user_by_id(&claims.sub)
        .await?
        .ok_or(AppError::Unauthenticated)
}

/// The ordered check chain: token validity, then the enabled flag, then
/// whichever role flag the tier demands. Short-circuits on the first
/// failure and hands back the authenticated account on success.
pub async fn authorize(
    db: &PostgresService,
    tokens: &TokenService,
    raw_token: &str,
    tier: Tier,
) -> Result<UserModel, AppError> {
    let user = authenticate(db, tokens, raw_token).await?;
    check_enabled(&user)?;
    match tier {
        Tier::User => {}
        Tier::Team => check_team(&user)?,
        Tier::Super => check_superuser(&user)?,
    }
    Ok(user)
}

/// Counterpart of `authorize` for the refresh route: accepts only
/// refresh-type tokens and applies the enabled check.
pub async fn authorize_refresh(
    db: &PostgresService,
    tokens: &TokenService,
    raw_token: &str,
) -> Result<UserModel, AppError> {
    let claims = tokens.verify_kind(raw_token, TokenKind::Refresh)?;
    let user = db
        .find_user_by_id(&claims.sub)
        .await?
        .ok_or(AppError::Unauthenticated)?;
    check_enabled(&user)?;
    Ok(user)
}
