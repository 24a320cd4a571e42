use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String, // stored lowercase
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub enabled: bool,
    pub team: bool,
    pub superuser: bool,
    pub definers: Option<Json>,
    pub email_verified_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::verification_code::Entity")]
    VerificationCode,
}

impl Related<super::verification_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VerificationCode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
