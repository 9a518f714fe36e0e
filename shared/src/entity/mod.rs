pub mod currency;
pub mod exchange_rate;
pub mod stock;
pub mod symbol;
