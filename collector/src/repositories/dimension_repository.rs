use sea_orm::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, QueryOrder, TryInsertResult};
use shared::entity::{currency, symbol};
use std::sync::Arc;
use tracing::debug;

use super::StoreError;

/// Currency and symbol lookups. Rows are seeded once and never change.
pub struct DimensionRepository {
    db: Arc<DatabaseConnection>,
}

impl DimensionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert any missing names; existing rows keep their ids.
    pub async fn seed(&self, currencies: &[String], symbols: &[String]) -> Result<u64, StoreError> {
        let mut inserted = 0;

        for name in currencies {
            let model = currency::ActiveModel {
                name: ActiveValue::Set(name.clone()),
                ..Default::default()
            };
            let result = currency::Entity::insert(model)
                .on_conflict(OnConflict::column(currency::Column::Name).do_nothing().to_owned())
                .do_nothing()
                .exec_without_returning(self.db.as_ref())
                .await?;
            inserted += rows_inserted(result);
        }

        for name in symbols {
            let model = symbol::ActiveModel {
                name: ActiveValue::Set(name.clone()),
                ..Default::default()
            };
            let result = symbol::Entity::insert(model)
                .on_conflict(OnConflict::column(symbol::Column::Name).do_nothing().to_owned())
                .do_nothing()
                .exec_without_returning(self.db.as_ref())
                .await?;
            inserted += rows_inserted(result);
        }

        debug!("Seeded {} dimension rows", inserted);
        Ok(inserted)
    }

    pub async fn currency_id(&self, name: &str) -> Result<i32, StoreError> {
        currency::Entity::find()
            .filter(currency::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await?
            .map(|c| c.id)
            .ok_or_else(|| StoreError::UnknownCurrency(name.to_string()))
    }

    pub async fn symbol_id(&self, name: &str) -> Result<i32, StoreError> {
        symbol::Entity::find()
            .filter(symbol::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await?
            .map(|s| s.id)
            .ok_or_else(|| StoreError::UnknownSymbol(name.to_string()))
    }

    /// Currency names in seeding order
    pub async fn currency_names(&self) -> Result<Vec<String>, StoreError> {
        let currencies = currency::Entity::find()
            .order_by_asc(currency::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(currencies.into_iter().map(|c| c.name).collect())
    }

    pub async fn symbol_names(&self) -> Result<Vec<String>, StoreError> {
        let symbols = symbol::Entity::find()
            .order_by_asc(symbol::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(symbols.into_iter().map(|s| s.name).collect())
    }
}

/// Rows written by an insert-or-ignore statement
pub(crate) fn rows_inserted(result: TryInsertResult<u64>) -> u64 {
    match result {
        TryInsertResult::Inserted(n) => n,
        TryInsertResult::Conflicted | TryInsertResult::Empty => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_db, strings};

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = memory_db().await;
        let repo = DimensionRepository::new(db);

        let first = repo
            .seed(&strings(&["USD", "EUR"]), &strings(&["AAPL"]))
            .await
            .unwrap();
        let second = repo
            .seed(&strings(&["USD", "EUR", "GBP"]), &strings(&["AAPL"]))
            .await
            .unwrap();

        assert_eq!(first, 3);
        assert_eq!(second, 1);
        assert_eq!(repo.currency_names().await.unwrap(), vec!["USD", "EUR", "GBP"]);
        assert_eq!(repo.symbol_names().await.unwrap(), vec!["AAPL"]);
    }

    #[tokio::test]
    async fn test_lookup_ids() {
        let db = memory_db().await;
        let repo = DimensionRepository::new(db);
        repo.seed(&strings(&["USD", "EUR"]), &strings(&["NVDA"]))
            .await
            .unwrap();

        let usd = repo.currency_id("USD").await.unwrap();
        let eur = repo.currency_id("EUR").await.unwrap();
        assert_ne!(usd, eur);
        assert!(repo.symbol_id("NVDA").await.is_ok());

        assert!(matches!(
            repo.currency_id("JPY").await,
            Err(StoreError::UnknownCurrency(name)) if name == "JPY"
        ));
        assert!(matches!(
            repo.symbol_id("MSFT").await,
            Err(StoreError::UnknownSymbol(name)) if name == "MSFT"
        ));
    }
}
