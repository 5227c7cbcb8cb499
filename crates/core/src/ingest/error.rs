use std::fmt;

#[derive(Debug, Clone)]
pub enum StockDataError {
    // FMP answers unknown tickers with [] on every endpoint, so "all sections
    // failed or empty" means check the symbol, not a schema problem.
    NoData { ticker: String },

    // A metric kind went missing or showed up twice during assembly. Bug, not bad input.
    Assembly { detail: String },

    // Problems are collected across every section before failing, so the full
    // list is available to the caller in one shot.
    Validation { problems: Vec<String> },
}

impl fmt::Display for StockDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockDataError::NoData { ticker } => {
                write!(f, "no data available for ticker {ticker}")
            }
            StockDataError::Assembly { detail } => {
                write!(f, "record assembly failed: {detail}")
            }
            StockDataError::Validation { problems } => {
                write!(f, "schema validation failed:\n{}", problems.join("\n"))
            }
        }
    }
}

impl std::error::Error for StockDataError {}
