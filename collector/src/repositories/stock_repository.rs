use analytics::data::Observation;
use chrono::NaiveDate;
use sea_orm::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ActiveValue, QueryOrder, QuerySelect};
use shared::entity::{stock, symbol};
use shared::StockRow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::dimension_repository::rows_inserted;
use super::{DimensionRepository, StoreError};

pub struct StockRepository {
    db: Arc<DatabaseConnection>,
    dimensions: DimensionRepository,
}

impl StockRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            dimensions: DimensionRepository::new(db.clone()),
            db,
        }
    }

    /// Insert-or-ignore keyed on `(date, symbol)`.
    pub async fn store(&self, rows: &[StockRow]) -> Result<u64, StoreError> {
        let mut ids: HashMap<String, i32> = HashMap::new();
        let mut inserted = 0;

        for row in rows {
            let symbol_id = match ids.get(&row.symbol) {
                Some(id) => *id,
                None => {
                    let id = self.dimensions.symbol_id(&row.symbol).await?;
                    ids.insert(row.symbol.clone(), id);
                    id
                }
            };

            let model = stock::ActiveModel {
                date: ActiveValue::Set(row.date),
                symbol_id: ActiveValue::Set(symbol_id),
                open: ActiveValue::Set(row.open),
                high: ActiveValue::Set(row.high),
                low: ActiveValue::Set(row.low),
                close: ActiveValue::Set(row.close),
                volume: ActiveValue::Set(row.volume),
                exchange: ActiveValue::Set(row.exchange.clone()),
                currency: ActiveValue::Set(row.currency.clone()),
            };
            let result = stock::Entity::insert(model)
                .on_conflict(
                    OnConflict::columns([stock::Column::Date, stock::Column::SymbolId])
                        .do_nothing()
                        .to_owned(),
                )
                .do_nothing()
                .exec_without_returning(self.db.as_ref())
                .await?;
            inserted += rows_inserted(result);
        }

        debug!("Stored {} of {} stock rows", inserted, rows.len());
        Ok(inserted)
    }

    /// Closing prices for one symbol, oldest first.
    pub async fn series(&self, symbol: &str) -> Result<Vec<Observation>, StoreError> {
        let symbol_id = self.dimensions.symbol_id(symbol).await?;

        let prices = stock::Entity::find()
            .filter(stock::Column::SymbolId.eq(symbol_id))
            .order_by_asc(stock::Column::Date)
            .all(self.db.as_ref())
            .await?;

        Ok(prices
            .into_iter()
            .map(|p| Observation::new(p.date, p.close))
            .collect())
    }

    pub async fn all_rows(&self) -> Result<Vec<StockRow>, StoreError> {
        let names: HashMap<i32, String> = symbol::Entity::find()
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let prices = stock::Entity::find()
            .order_by_asc(stock::Column::Date)
            .order_by_asc(stock::Column::SymbolId)
            .all(self.db.as_ref())
            .await?;

        prices
            .into_iter()
            .map(|p| {
                let symbol = names
                    .get(&p.symbol_id)
                    .cloned()
                    .ok_or_else(|| StoreError::UnknownSymbol(p.symbol_id.to_string()))?;
                Ok(StockRow {
                    date: p.date,
                    symbol,
                    open: p.open,
                    high: p.high,
                    low: p.low,
                    close: p.close,
                    volume: p.volume,
                    exchange: p.exchange,
                    currency: p.currency,
                })
            })
            .collect()
    }

    pub async fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>, StoreError> {
        let range: Option<(Option<NaiveDate>, Option<NaiveDate>)> = stock::Entity::find()
            .select_only()
            .column_as(Expr::col(stock::Column::Date).min(), "min_date")
            .column_as(Expr::col(stock::Column::Date).max(), "max_date")
            .into_tuple()
            .one(self.db.as_ref())
            .await?;

        Ok(match range {
            Some((Some(min), Some(max))) => Some((min, max)),
            _ => None,
        })
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(stock::Entity::find().count(self.db.as_ref()).await?)
    }

    pub async fn clear(&self) -> Result<u64, StoreError> {
        let result = stock::Entity::delete_many().exec(self.db.as_ref()).await?;
        Ok(result.rows_affected)
    }
}
