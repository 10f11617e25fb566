// Builds the query string of `GET /api/moving-averages` from the user's selection.
use shared::models::QueryConfig;

/// What a refresh asks the service for.
#[derive(Debug, Clone, PartialEq)]
pub enum MovingAverageQuery {
    /// One ticker, SMA series over `config.time_period`.
    Single { ticker: String, config: QueryConfig },
    /// Every watchlist symbol at once; the service picks the periods.
    Watchlist { tickers: Vec<String>, config: QueryConfig },
}

impl MovingAverageQuery {
    pub fn single(ticker: impl Into<String>, config: QueryConfig) -> Self {
        MovingAverageQuery::Single {
            ticker: ticker.into(),
            config,
        }
    }

    pub fn watchlist(tickers: &[String], config: QueryConfig) -> Self {
        MovingAverageQuery::Watchlist {
            tickers: tickers.to_vec(),
            config,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        match self {
            MovingAverageQuery::Single { config, .. } => config,
            MovingAverageQuery::Watchlist { config, .. } => config,
        }
    }

    /// A watchlist query without symbols must not reach the network.
    pub fn has_no_tickers(&self) -> bool {
        matches!(self, MovingAverageQuery::Watchlist { tickers, .. } if tickers.is_empty())
    }

    /// Query parameters in the order the service documents them. Tickers are sent
    /// as given; the service reports invalid ones per ticker.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            MovingAverageQuery::Single { ticker, config } => vec![
                ("ticker", ticker.clone()),
                ("time_period", config.time_period.to_string()),
                ("interval", config.interval.as_str().to_string()),
                ("series_type", config.series_type.as_str().to_string()),
            ],
            MovingAverageQuery::Watchlist { tickers, config } => vec![
                ("tickers", tickers.join(",")),
                ("interval", config.interval.as_str().to_string()),
                ("series_type", config.series_type.as_str().to_string()),
            ],
        }
    }
}
