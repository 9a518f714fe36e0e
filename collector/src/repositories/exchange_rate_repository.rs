use analytics::data::Observation;
use chrono::NaiveDate;
use sea_orm::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict, Query};
use sea_orm::{ActiveValue, QueryOrder, QuerySelect};
use shared::entity::{currency, exchange_rate, stock};
use shared::ExchangeRateRow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::dimension_repository::rows_inserted;
use super::{DimensionRepository, StoreError};

pub struct ExchangeRateRepository {
    db: Arc<DatabaseConnection>,
    dimensions: DimensionRepository,
}

impl ExchangeRateRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            dimensions: DimensionRepository::new(db.clone()),
            db,
        }
    }

    /// Insert-or-ignore keyed on `(date, base, target)`.
    ///
    /// Each row commits on its own, so an unknown currency stops the loop
    /// but leaves the rows before it stored.
    pub async fn store(&self, rows: &[ExchangeRateRow]) -> Result<u64, StoreError> {
        let mut ids: HashMap<String, i32> = HashMap::new();
        let mut inserted = 0;

        for row in rows {
            let base_currency_id = self.cached_currency_id(&mut ids, &row.base_currency).await?;
            let target_currency_id = self.cached_currency_id(&mut ids, &row.target_currency).await?;

            let model = exchange_rate::ActiveModel {
                date: ActiveValue::Set(row.date),
                base_currency_id: ActiveValue::Set(base_currency_id),
                target_currency_id: ActiveValue::Set(target_currency_id),
                rate: ActiveValue::Set(row.rate),
            };
            let result = exchange_rate::Entity::insert(model)
                .on_conflict(
                    OnConflict::columns([
                        exchange_rate::Column::Date,
                        exchange_rate::Column::BaseCurrencyId,
                        exchange_rate::Column::TargetCurrencyId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .do_nothing()
                .exec_without_returning(self.db.as_ref())
                .await?;
            inserted += rows_inserted(result);
        }

        debug!("Stored {} of {} exchange rate rows", inserted, rows.len());
        Ok(inserted)
    }

    async fn cached_currency_id(
        &self,
        ids: &mut HashMap<String, i32>,
        name: &str,
    ) -> Result<i32, StoreError> {
        if let Some(id) = ids.get(name) {
            return Ok(*id);
        }
        let id = self.dimensions.currency_id(name).await?;
        ids.insert(name.to_string(), id);
        Ok(id)
    }

    /// Rates for one pair, oldest first, limited to days with stock data.
    pub async fn series(&self, base: &str, target: &str) -> Result<Vec<Observation>, StoreError> {
        let base_id = self.dimensions.currency_id(base).await?;
        let target_id = self.dimensions.currency_id(target).await?;

        let rates = exchange_rate::Entity::find()
            .filter(exchange_rate::Column::BaseCurrencyId.eq(base_id))
            .filter(exchange_rate::Column::TargetCurrencyId.eq(target_id))
            .filter(
                exchange_rate::Column::Date.in_subquery(
                    Query::select()
                        .distinct()
                        .column(stock::Column::Date)
                        .from(stock::Entity)
                        .to_owned(),
                ),
            )
            .order_by_asc(exchange_rate::Column::Date)
            .all(self.db.as_ref())
            .await?;

        Ok(rates
            .into_iter()
            .map(|r| Observation::new(r.date, r.rate))
            .collect())
    }

    /// Every stored rate with currency names resolved, for export.
    pub async fn all_rows(&self) -> Result<Vec<ExchangeRateRow>, StoreError> {
        let names: HashMap<i32, String> = currency::Entity::find()
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let rates = exchange_rate::Entity::find()
            .order_by_asc(exchange_rate::Column::Date)
            .order_by_asc(exchange_rate::Column::BaseCurrencyId)
            .order_by_asc(exchange_rate::Column::TargetCurrencyId)
            .all(self.db.as_ref())
            .await?;

        rates
            .into_iter()
            .map(|r| {
                let base_currency = names
                    .get(&r.base_currency_id)
                    .cloned()
                    .ok_or_else(|| StoreError::UnknownCurrency(r.base_currency_id.to_string()))?;
                let target_currency = names
                    .get(&r.target_currency_id)
                    .cloned()
                    .ok_or_else(|| StoreError::UnknownCurrency(r.target_currency_id.to_string()))?;
                Ok(ExchangeRateRow {
                    date: r.date,
                    base_currency,
                    target_currency,
                    rate: r.rate,
                })
            })
            .collect()
    }

    pub async fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>, StoreError> {
        let range: Option<(Option<NaiveDate>, Option<NaiveDate>)> = exchange_rate::Entity::find()
            .select_only()
            .column_as(Expr::col(exchange_rate::Column::Date).min(), "min_date")
            .column_as(Expr::col(exchange_rate::Column::Date).max(), "max_date")
            .into_tuple()
            .one(self.db.as_ref())
            .await?;

        Ok(match range {
            Some((Some(min), Some(max))) => Some((min, max)),
            _ => None,
        })
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(exchange_rate::Entity::find().count(self.db.as_ref()).await?)
    }

    pub async fn clear(&self) -> Result<u64, StoreError> {
        let result = exchange_rate::Entity::delete_many()
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }
}
