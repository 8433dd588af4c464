//! Migration: Add self-service profile columns to users.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Users::Table)
                    .add_column_if_not_exists(ColumnDef::new(Users::UserImageUri).text().null())
                    .add_column_if_not_exists(
                        ColumnDef::new(Users::CompanyName).string_len(52).null(),
                    )
                    .add_column_if_not_exists(ColumnDef::new(Users::CompanyImageUri).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Users::Table)
                    .drop_column(Users::UserImageUri)
                    .drop_column(Users::CompanyName)
                    .drop_column(Users::CompanyImageUri)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    UserImageUri,
    CompanyName,
    CompanyImageUri,
}
