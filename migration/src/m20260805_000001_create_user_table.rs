use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .col(
                        ColumnDef::new(User::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                    )
                    .col(
                        ColumnDef::new(User::Name)
                            .string()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(User::Email)
                            .string()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(User::PasswordHash)
                            .string()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(User::Enabled)
                            .boolean()
                            .not_null()
                            .default(true)
                    )
                    .col(
                        ColumnDef::new(User::Team)
                            .boolean()
                            .not_null()
                            .default(false)
                    )
                    .col(
                        ColumnDef::new(User::Superuser)
                            .boolean()
                            .not_null()
                            .default(false)
                    )
                    .col(ColumnDef::new(User::Definers).json_binary())
                    .col(ColumnDef::new(User::EmailVerifiedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .col(
                        ColumnDef::new(User::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                    )
                    .to_owned()
            )
            .await?;

        // Emails are stored lowercased; this index makes the
        // case-insensitive identity unique at the storage boundary too.
        manager
            .create_index(
                Index::create()
                    .name("idx_user_email_unique")
                    .table(User::Table)
                    .col(User::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(User::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Enabled,
    Team,
    Superuser,
    Definers,
    EmailVerifiedAt,
    CreatedAt,
    UpdatedAt,
}
