use crate::db::postgres_service::PostgresService;
use crate::types::{error::AppError, user::NewUser};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

impl PostgresService {
    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email.to_lowercase()))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn find_user_by_id(&self, id: &Uuid) -> Result<Option<UserModel>, AppError> {
        Ok(User::find_by_id(*id).one(&self.database_connection).await?)
    }

    /// Lookup by email. Identity is case-insensitive; input is folded
    /// to lowercase before the query.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email.to_lowercase()))
            .one(&self.database_connection)
            .await?)
    }

    /// Signup: create user. Fails with `AlreadyExists` when the email,
    /// compared case-insensitively, is taken.
    pub async fn create_user(&self, payload: NewUser) -> Result<UserModel, AppError> {
        let email = payload.email.to_lowercase();
        if self.user_exists_by_email(&email).await? {
            return Err(AppError::AlreadyExists);
        }
        let now = Utc::now();
        let txn = self.database_connection.begin().await?;

        let user = UserActive {
            id: Set(Uuid::new_v4()),
            name: Set(payload.name),
            email: Set(email),
            password_hash: Set(payload.password_hash),
            enabled: Set(true),
            team: Set(false),
            superuser: Set(false),
            definers: Set(payload.definers),
            email_verified_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(user)
    }

    pub async fn set_email_verified(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.email_verified_at = Set(Some(Utc::now()));
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }

    pub async fn set_password_hash(&self, user_id: Uuid, password_hash: String) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.password_hash = Set(password_hash);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }

    pub async fn set_enabled(&self, user_id: Uuid, enabled: bool) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.enabled = Set(enabled);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }

    pub async fn set_team(&self, user_id: Uuid, team: bool) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.team = Set(team);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }

    pub async fn set_superuser(&self, user_id: Uuid, superuser: bool) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.superuser = Set(superuser);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }
}
