pub mod dimension_repository;
pub mod error;
pub mod exchange_rate_repository;
pub mod stock_repository;

pub use dimension_repository::DimensionRepository;
pub use error::StoreError;
pub use exchange_rate_repository::ExchangeRateRepository;
pub use stock_repository::StockRepository;
