use entity::user::Model as UserModel;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::utils::password::verify_password;

/// Check a submitted email/password pair against the directory.
///
/// A missing account and a wrong password are indistinguishable to the
/// caller; both come back as `InvalidCredentials` so the response never
/// reveals whether the email is registered.
pub async fn verify_credentials(
    db: &PostgresService,
    email: &str,
    password: &str,
) -> Result<UserModel, AppError> {
    let user = db
        .find_user_by_email(email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let matches =
        verify_password(password, &user.password_hash).map_err(|_| AppError::InvalidCredentials)?;
    if !matches {
        return Err(AppError::InvalidCredentials);
    }
    Ok(user)
}
