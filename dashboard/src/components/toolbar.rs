// Toolbar: one-line summary of the controls the user can edit.
use client::storage::KeyValueStore;

use crate::config::DashboardVariant;
use crate::state::app_state::AppState;

pub fn toolbar_lines<S: KeyValueStore>(state: &AppState<S>) -> Vec<String> {
    let query = &state.query;
    match state.variant {
        DashboardVariant::SingleTicker => vec![
            format!(
                "Ticker: {} | Time Period: {} | Interval: {} | Series Type: {}",
                state.ticker, query.time_period, query.interval, query.series_type
            ),
            format!("Favorites: {}", state.ticker_options().join(", ")),
        ],
        DashboardVariant::Watchlist => vec![
            format!("Interval: {} | Series Type: {}", query.interval, query.series_type),
            format!("Watchlist: {}", watchlist_summary(state)),
        ],
    }
}

pub fn watchlist_summary<S: KeyValueStore>(state: &AppState<S>) -> String {
    let options = state.ticker_options();
    if options.is_empty() {
        "(empty)".to_string()
    } else {
        options.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardSettings;
    use client::storage::MemoryStore;
    use shared::models::QueryConfig;

    fn state(variant: DashboardVariant) -> AppState<MemoryStore> {
        let settings = DashboardSettings {
            variant,
            default_ticker: "AAPL".to_string(),
            refresh_on_start: false,
            query: QueryConfig::default(),
        };
        AppState::new(&settings, MemoryStore::new())
    }

    #[test]
    fn test_single_ticker_toolbar() {
        let lines = toolbar_lines(&state(DashboardVariant::SingleTicker));
        assert_eq!(lines[0], "Ticker: AAPL | Time Period: 50 | Interval: daily | Series Type: close");
        assert_eq!(lines[1], "Favorites: AAPL");
    }

    #[test]
    fn test_watchlist_toolbar() {
        let mut state = state(DashboardVariant::Watchlist);
        assert_eq!(toolbar_lines(&state)[1], "Watchlist: AAPL, MSFT, TSLA");

        for symbol in ["AAPL", "MSFT", "TSLA"] {
            state.remove_favorite(symbol).unwrap();
        }
        assert_eq!(watchlist_summary(&state), "(empty)");
    }
}
