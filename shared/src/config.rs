use dotenv::dotenv;

pub struct Config {
    pub database_url: String,
    pub exchange_rate_api_key: Option<String>,
    pub exchange_rate_api_url: String,
    pub stock_api_key: Option<String>,
    pub stock_api_url: String,
    pub base_currency: String,
    pub target_currencies: Vec<String>,
    pub stock_symbols: Vec<String>,
    /// Records the upstream APIs allow per batch of calls
    pub record_budget: usize,
    pub http_timeout_secs: u64,
    pub output_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data.db?mode=rwc".to_string()),
            exchange_rate_api_key: non_empty_var("EXCHANGE_RATE_API_KEY"),
            exchange_rate_api_url: std::env::var("EXCHANGE_RATE_API_URL")
                .unwrap_or_else(|_| "https://api.apilayer.com/exchangerates_data".to_string()),
            stock_api_key: non_empty_var("STOCK_API_KEY"),
            stock_api_url: std::env::var("STOCK_API_URL")
                .unwrap_or_else(|_| "https://api.marketstack.com/v2".to_string()),
            base_currency: std::env::var("BASE_CURRENCY")
                .unwrap_or_else(|_| "USD".to_string())
                .trim()
                .to_uppercase(),
            target_currencies: parse_list(
                &std::env::var("TARGET_CURRENCIES").unwrap_or_else(|_| "CNY,EUR,GBP".to_string()),
            ),
            stock_symbols: parse_list(
                &std::env::var("STOCK_SYMBOLS").unwrap_or_else(|_| "AAPL,NVDA,TSLA".to_string()),
            ),
            record_budget: std::env::var("RECORD_BUDGET")
                .unwrap_or_else(|_| "25".to_string())
                .parse()?,
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "output".to_string()),
        })
    }

    /// Every currency the dimension table has to know about, base first.
    pub fn all_currencies(&self) -> Vec<String> {
        let mut currencies = vec![self.base_currency.clone()];
        for target in &self.target_currencies {
            if !currencies.contains(target) {
                currencies.push(target.clone());
            }
        }
        currencies
    }

    pub fn require_exchange_rate_api_key(&self) -> Result<&str, anyhow::Error> {
        self.exchange_rate_api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("EXCHANGE_RATE_API_KEY is not set"))
    }

    pub fn require_stock_api_key(&self) -> Result<&str, anyhow::Error> {
        self.stock_api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("STOCK_API_KEY is not set"))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Split a comma separated list, dropping blanks and upper-casing codes.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list(" cny, EUR ,,gbp "), vec!["CNY", "EUR", "GBP"]);
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_all_currencies_dedupes_base() {
        let config = Config {
            database_url: String::new(),
            exchange_rate_api_key: None,
            exchange_rate_api_url: String::new(),
            stock_api_key: None,
            stock_api_url: String::new(),
            base_currency: "USD".to_string(),
            target_currencies: vec!["EUR".to_string(), "USD".to_string()],
            stock_symbols: vec![],
            record_budget: 25,
            http_timeout_secs: 30,
            output_dir: String::new(),
        };

        assert_eq!(config.all_currencies(), vec!["USD", "EUR"]);
        assert!(config.require_stock_api_key().is_err());
    }
}
