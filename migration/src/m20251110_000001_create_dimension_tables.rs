use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Currency::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Currency::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Currency::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Symbol::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Symbol::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Symbol::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Symbol::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Currency::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Currency {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Symbol {
    Table,
    Id,
    Name,
}
