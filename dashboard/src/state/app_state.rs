// Global application state for the dashboard: the ticker being edited, the
// indicator settings and the persisted watchlist.

use client::query::MovingAverageQuery;
use client::storage::{KeyValueStore, WatchlistStore};
use client::Result;
use shared::models::{Interval, QueryConfig, SeriesType};
use shared::utils::normalize_symbol;

use crate::config::{DashboardSettings, DashboardVariant};

pub struct AppState<S: KeyValueStore> {
    pub variant: DashboardVariant,
    pub default_ticker: String,
    /// Content of the ticker input, always uppercase.
    pub ticker: String,
    pub query: QueryConfig,
    pub watchlist: WatchlistStore<S>,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn new(settings: &DashboardSettings, store: S) -> Self {
        let default_ticker = settings.default_ticker.to_uppercase();
        Self {
            variant: settings.variant,
            ticker: default_ticker.clone(),
            default_ticker,
            query: settings.query,
            watchlist: WatchlistStore::load(store, settings.variant.seed()),
        }
    }

    pub fn set_ticker(&mut self, input: &str) {
        self.ticker = input.to_uppercase();
    }

    pub fn set_interval(&mut self, interval: Interval) {
        self.query.interval = interval;
    }

    pub fn set_series_type(&mut self, series_type: SeriesType) {
        self.query.series_type = series_type;
    }

    pub fn set_time_period(&mut self, time_period: u32) {
        self.query.time_period = time_period;
    }

    /// Adds `symbol`, or the ticker input when none is given.
    pub fn add_favorite(&mut self, symbol: Option<&str>) -> Result<bool> {
        let symbol = symbol.map(str::to_string).unwrap_or_else(|| self.ticker.clone());
        self.watchlist.add(&symbol)
    }

    pub fn remove_favorite(&mut self, symbol: &str) -> Result<bool> {
        self.watchlist.remove(symbol)
    }

    /// Whatever the active variant would send on refresh.
    pub fn current_query(&self) -> MovingAverageQuery {
        match self.variant {
            DashboardVariant::SingleTicker => {
                let ticker = normalize_symbol(&self.ticker).unwrap_or_else(|| self.ticker.clone());
                MovingAverageQuery::single(ticker, self.query)
            }
            DashboardVariant::Watchlist => {
                MovingAverageQuery::watchlist(self.watchlist.symbols(), self.query)
            }
        }
    }

    /// Selector contents: favourites, led by the default ticker in single-ticker mode.
    pub fn ticker_options(&self) -> Vec<String> {
        match self.variant {
            DashboardVariant::SingleTicker => self.watchlist.ticker_options(&self.default_ticker),
            DashboardVariant::Watchlist => self.watchlist.favorite_options(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::storage::MemoryStore;
    use shared::models::FAVORITES_KEY;

    fn settings(variant: DashboardVariant) -> DashboardSettings {
        DashboardSettings {
            variant,
            default_ticker: "aapl".to_string(),
            refresh_on_start: false,
            query: QueryConfig::default(),
        }
    }

    #[test]
    fn test_single_ticker_state() {
        let mut state = AppState::new(&settings(DashboardVariant::SingleTicker), MemoryStore::new());
        assert_eq!(state.ticker, "AAPL");
        assert!(state.watchlist.is_empty());

        state.set_ticker("msft");
        state.set_time_period(21);
        state.set_interval(Interval::Weekly);

        let query = state.current_query();
        assert_eq!(
            query.params(),
            vec![
                ("ticker", "MSFT".to_string()),
                ("time_period", "21".to_string()),
                ("interval", "weekly".to_string()),
                ("series_type", "close".to_string()),
            ]
        );
    }

    #[test]
    fn test_add_favorite_uses_ticker_input() {
        let mut state = AppState::new(&settings(DashboardVariant::SingleTicker), MemoryStore::new());
        state.set_ticker(" nvda ");
        assert!(state.add_favorite(None).unwrap());
        assert_eq!(state.watchlist.symbols(), ["NVDA"]);
        assert_eq!(state.ticker_options(), ["AAPL", "NVDA"]);
    }

    #[test]
    fn test_watchlist_state_query() {
        let store = MemoryStore::new().with_entry(FAVORITES_KEY, r#"["SPY"]"#);
        let mut state = AppState::new(&settings(DashboardVariant::Watchlist), store);
        state.add_favorite(Some("qqq")).unwrap();
        state.set_series_type(SeriesType::Open);

        let query = state.current_query();
        assert_eq!(query.params()[0], ("tickers", "SPY,QQQ".to_string()));
        assert_eq!(query.params()[2], ("series_type", "open".to_string()));

        state.remove_favorite("spy").unwrap();
        state.remove_favorite("QQQ").unwrap();
        assert!(state.current_query().has_no_tickers());
    }
}
