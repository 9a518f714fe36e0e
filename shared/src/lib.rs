pub mod api;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod exchange_rates;
pub mod marketstack;
pub mod models;
pub mod organizer;

pub use config::Config;
pub use database::get_db_connection;
pub use error::FetchError;
pub use exchange_rates::ExchangeRatesClient;
pub use marketstack::MarketstackClient;
pub use models::*;
