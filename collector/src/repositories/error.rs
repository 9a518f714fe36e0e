use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("currency {0} not found")]
    UnknownCurrency(String),

    #[error("symbol {0} not found")]
    UnknownSymbol(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}
