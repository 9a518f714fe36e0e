//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exchange_rate")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub date: Date,
    #[sea_orm(primary_key, auto_increment = false)]
    pub base_currency_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub target_currency_id: i32,
    #[sea_orm(column_type = "Double")]
    pub rate: f64,
}

// Both ends point at the currency table, so there is no single `Related` impl
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::currency::Entity",
        from = "Column::BaseCurrencyId",
        to = "super::currency::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    BaseCurrency,
    #[sea_orm(
        belongs_to = "super::currency::Entity",
        from = "Column::TargetCurrencyId",
        to = "super::currency::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    TargetCurrency,
}

impl ActiveModelBehavior for ActiveModel {}
