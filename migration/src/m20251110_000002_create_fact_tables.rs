use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One rate per currency pair per day
        manager
            .create_table(
                Table::create()
                    .table(ExchangeRate::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ExchangeRate::Date).date().not_null())
                    .col(ColumnDef::new(ExchangeRate::BaseCurrencyId).integer().not_null())
                    .col(ColumnDef::new(ExchangeRate::TargetCurrencyId).integer().not_null())
                    .col(ColumnDef::new(ExchangeRate::Rate).double().not_null())
                    .primary_key(
                        Index::create()
                            .col(ExchangeRate::Date)
                            .col(ExchangeRate::BaseCurrencyId)
                            .col(ExchangeRate::TargetCurrencyId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exchange_rate_base_currency")
                            .from(ExchangeRate::Table, ExchangeRate::BaseCurrencyId)
                            .to(Currency::Table, Currency::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exchange_rate_target_currency")
                            .from(ExchangeRate::Table, ExchangeRate::TargetCurrencyId)
                            .to(Currency::Table, Currency::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One end-of-day record per symbol per day
        manager
            .create_table(
                Table::create()
                    .table(Stock::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stock::Date).date().not_null())
                    .col(ColumnDef::new(Stock::SymbolId).integer().not_null())
                    .col(ColumnDef::new(Stock::Open).double().null())
                    .col(ColumnDef::new(Stock::High).double().null())
                    .col(ColumnDef::new(Stock::Low).double().null())
                    .col(ColumnDef::new(Stock::Close).double().not_null())
                    .col(ColumnDef::new(Stock::Volume).double().null())
                    .col(ColumnDef::new(Stock::Exchange).string().null())
                    .col(ColumnDef::new(Stock::Currency).string().not_null())
                    .primary_key(Index::create().col(Stock::Date).col(Stock::SymbolId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_symbol")
                            .from(Stock::Table, Stock::SymbolId)
                            .to(Symbol::Table, Symbol::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stock::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ExchangeRate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ExchangeRate {
    Table,
    Date,
    BaseCurrencyId,
    TargetCurrencyId,
    Rate,
}

#[derive(DeriveIden)]
enum Stock {
    Table,
    Date,
    SymbolId,
    Open,
    High,
    Low,
    Close,
    Volume,
    Exchange,
    Currency,
}

#[derive(DeriveIden)]
enum Currency {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Symbol {
    Table,
    Id,
}
