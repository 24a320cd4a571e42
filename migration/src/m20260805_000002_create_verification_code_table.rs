use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerificationCode::Table)
                    .col(
                        ColumnDef::new(VerificationCode::UserId)
                            .uuid()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(VerificationCode::Purpose)
                            .string()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(VerificationCode::Code)
                            .string()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(VerificationCode::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(VerificationCode::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    // One live code per (user, purpose); issuing again
                    // overwrites via ON CONFLICT on this key.
                    .primary_key(
                        Index::create()
                            .col(VerificationCode::UserId)
                            .col(VerificationCode::Purpose),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_verification_code_user")
                            .from(VerificationCode::Table, VerificationCode::UserId)
                            .to(User::Table, User::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned()
            )
            .await?;

        // Collision checks at generation time scan a purpose namespace
        // by code value.
        manager
            .create_index(
                Index::create()
                    .name("idx_verification_code_purpose_code")
                    .table(VerificationCode::Table)
                    .col(VerificationCode::Purpose)
                    .col(VerificationCode::Code)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(VerificationCode::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum VerificationCode {
    Table,
    UserId,
    Purpose,
    Code,
    ExpiresAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
