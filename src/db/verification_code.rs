use crate::db::postgres_service::PostgresService;
use crate::types::{code::CodePurpose, error::AppError};
use chrono::{Duration, Utc};
use entity::verification_code::{ActiveModel as CodeActive, Column, Entity as VerificationCode};
use rand_core::{OsRng, RngCore};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

/// Validity window for a freshly issued code.
pub const CODE_TTL_MINUTES: i64 = 30;

/// 16 CSPRNG bytes rendered as 32 hex chars. 128 bits of entropy makes
/// guessing within the expiry window infeasible.
fn generate_code() -> String {
    let mut buf = [0u8; 16];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

impl PostgresService {
    async fn code_value_exists(&self, purpose: CodePurpose, value: &str) -> Result<bool, AppError> {
        Ok(VerificationCode::find()
            .filter(Column::Purpose.eq(purpose.as_str()))
            .filter(Column::Code.eq(value))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    /// Generate and store a one-time code for (user, purpose),
    /// replacing any previous unconsumed code for that key. The upsert
    /// keeps concurrent issues from leaving two live codes.
    pub async fn issue_code(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
    ) -> Result<String, AppError> {
        // Collision loop is a safety net only; a 128-bit collision does
        // not happen in practice.
        let code = loop {
            let candidate = generate_code();
            if !self.code_value_exists(purpose, &candidate).await? {
                break candidate;
            }
        };

        let now = Utc::now();
        VerificationCode::insert(CodeActive {
            user_id: Set(user_id),
            purpose: Set(purpose.as_str().to_string()),
            code: Set(code.clone()),
            expires_at: Set(now + Duration::minutes(CODE_TTL_MINUTES)),
            created_at: Set(now),
        })
        .on_conflict(
            OnConflict::columns([Column::UserId, Column::Purpose])
                .update_columns([Column::Code, Column::ExpiresAt, Column::CreatedAt])
                .to_owned(),
        )
        .exec(&self.database_connection)
        .await?;

        Ok(code)
    }

    /// One-time consumption. Absent, mismatched, or expired codes all
    /// fail the same way; a mismatch leaves the stored code intact so
    /// the user can retry until it expires.
    pub async fn consume_code(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
        submitted: &str,
    ) -> Result<(), AppError> {
        let stored = VerificationCode::find_by_id((user_id, purpose.as_str().to_string()))
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::InvalidCode)?;

        if stored.code != submitted || Utc::now() > stored.expires_at {
            return Err(AppError::InvalidCode);
        }

        VerificationCode::delete_by_id((user_id, purpose.as_str().to_string()))
            .exec(&self.database_connection)
            .await?;
        Ok(())
    }
}
