//! Text report of correlations and largest moves

use crate::data::MaxChange;

const MISSING: &str = "n/a";

/// Correlations of one symbol's changes against every target currency.
#[derive(Debug, Clone)]
pub struct CorrelationRow {
    pub symbol: String,
    /// One entry per report currency, `None` when it could not be computed
    pub values: Vec<Option<f64>>,
}

/// Largest move of a named series (a currency or a symbol).
#[derive(Debug, Clone)]
pub struct MoveEntry {
    pub name: String,
    pub change: Option<MaxChange>,
}

/// Metrics report
#[derive(Debug, Clone, Default)]
pub struct MetricsReport {
    currencies: Vec<String>,
    correlations: Vec<CorrelationRow>,
    currency_moves: Vec<MoveEntry>,
    stock_moves: Vec<MoveEntry>,
}

impl MetricsReport {
    /// Create an empty report whose correlation columns are `currencies`
    pub fn new(currencies: Vec<String>) -> Self {
        Self {
            currencies,
            ..Default::default()
        }
    }

    pub fn push_correlations(&mut self, symbol: impl Into<String>, values: Vec<Option<f64>>) {
        self.correlations.push(CorrelationRow {
            symbol: symbol.into(),
            values,
        });
    }

    pub fn push_currency_move(&mut self, name: impl Into<String>, change: Option<MaxChange>) {
        self.currency_moves.push(MoveEntry {
            name: name.into(),
            change,
        });
    }

    pub fn push_stock_move(&mut self, name: impl Into<String>, change: Option<MaxChange>) {
        self.stock_moves.push(MoveEntry {
            name: name.into(),
            change,
        });
    }

    pub fn currencies(&self) -> &[String] {
        &self.currencies
    }

    pub fn correlations(&self) -> &[CorrelationRow] {
        &self.correlations
    }

    pub fn currency_moves(&self) -> &[MoveEntry] {
        &self.currency_moves
    }

    pub fn stock_moves(&self) -> &[MoveEntry] {
        &self.stock_moves
    }

    /// Format report as tab-delimited text
    pub fn format(&self) -> String {
        let mut out = String::new();

        out.push_str("Correlation between exchange rate and stock price:\n");
        out.push_str("\t\t");
        out.push_str(&self.currencies.join("\t\t"));
        out.push('\n');
        for row in &self.correlations {
            out.push_str(&row.symbol);
            for value in &row.values {
                out.push('\t');
                match value {
                    Some(v) => out.push_str(&format!("{:.2}", v)),
                    None => out.push_str(MISSING),
                }
            }
            out.push('\n');
        }

        out.push_str("\nMax change of exchange rates:\n");
        Self::format_moves(&mut out, &self.currency_moves);

        out.push_str("\nMax change of stocks:\n");
        Self::format_moves(&mut out, &self.stock_moves);

        out
    }

    fn format_moves(out: &mut String, moves: &[MoveEntry]) {
        out.push_str("\t\t\tDate\t\t\tChange\n");
        for entry in moves {
            let (date, change) = match &entry.change {
                Some(MaxChange {
                    date: Some(date),
                    percent,
                }) => (date.format("%Y-%m-%d").to_string(), format!("{:+.2}", percent)),
                Some(MaxChange { date: None, percent }) => {
                    (MISSING.to_string(), format!("{:+.2}", percent))
                }
                None => (MISSING.to_string(), MISSING.to_string()),
            };
            out.push_str(&format!("{}\t\t{}\t\t{}\n", entry.name, date, change));
        }
    }
}
