//! Migration: Create the roles table and seed the four fixed roles.

use sea_orm_migration::prelude::*;

use domain::RoleName;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Roles::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Roles::Name).string_len(50).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(Roles::Table).columns([Roles::Id, Roles::Name]);
        for role in RoleName::ALL {
            insert
                .values([role.id().into(), role.as_str().into()])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Roles {
    Table,
    Id,
    Name,
}
