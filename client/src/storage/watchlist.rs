// Watchlist of favourite tickers, written through to a KeyValueStore on every change.
use shared::models::FAVORITES_KEY;
use shared::utils::normalize_symbol;

use super::key_value::KeyValueStore;
use crate::error::{ClientError, Result};

pub struct WatchlistStore<S: KeyValueStore> {
    store: S,
    symbols: Vec<String>,
}

impl<S: KeyValueStore> WatchlistStore<S> {
    /// Loads the persisted list, or `seed` when the key is absent or does not hold
    /// a JSON array of strings. A seeded list is written back straight away. Never
    /// fails.
    pub fn load<T: AsRef<str>>(store: S, seed: &[T]) -> Self {
        let persisted = Self::read_persisted(&store);
        let seeded = persisted.is_none();
        let raw: Vec<String> = match persisted {
            Some(list) => list,
            None => seed.iter().map(|s| s.as_ref().to_string()).collect(),
        };

        let mut symbols: Vec<String> = Vec::with_capacity(raw.len());
        for symbol in raw.iter().filter_map(|s| normalize_symbol(s)) {
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
        tracing::info!(count = symbols.len(), seeded, "Loaded watchlist");
        let mut watchlist = Self { store, symbols };
        if seeded {
            if let Err(e) = watchlist.save() {
                tracing::warn!(error = %e, "Unable to persist seeded watchlist");
            }
        }
        watchlist
    }

    fn read_persisted(store: &S) -> Option<Vec<String>> {
        let stored = match store.get(FAVORITES_KEY) {
            Ok(stored) => stored?,
            Err(e) => {
                tracing::warn!(error = %e, "Unable to read persisted watchlist, using seed list");
                return None;
            }
        };
        match serde_json::from_str::<Vec<String>>(&stored) {
            Ok(list) => Some(list),
            Err(e) => {
                tracing::warn!(error = %e, "Persisted watchlist is malformed, using seed list");
                None
            }
        }
    }

    /// Overwrites the persisted list with the current one.
    pub fn save(&mut self) -> Result<()> {
        let encoded = serde_json::to_string(&self.symbols)
            .map_err(|e| ClientError::Storage(format!("Failed to encode watchlist: {}", e)))?;
        self.store.set(FAVORITES_KEY, encoded)?;
        tracing::debug!(symbols = ?self.symbols, "Saved watchlist");
        Ok(())
    }

    /// Appends the normalised symbol. `false` if it was empty or already tracked.
    pub fn add(&mut self, symbol: &str) -> Result<bool> {
        let Some(symbol) = normalize_symbol(symbol) else {
            return Ok(false);
        };
        if self.contains(&symbol) {
            return Ok(false);
        }
        tracing::info!(%symbol, "Adding ticker to watchlist");
        self.symbols.push(symbol);
        if let Err(e) = self.save() {
            self.symbols.pop();
            return Err(e);
        }
        Ok(true)
    }

    /// Drops the symbol. Stored entries are canonical uppercase, so the input is
    /// normalised the same way before matching. `false` if it was not tracked.
    pub fn remove(&mut self, symbol: &str) -> Result<bool> {
        let Some(symbol) = normalize_symbol(symbol) else {
            return Ok(false);
        };
        let Some(index) = self.symbols.iter().position(|s| *s == symbol) else {
            return Ok(false);
        };
        let removed = self.symbols.remove(index);
        if let Err(e) = self.save() {
            self.symbols.insert(index, removed);
            return Err(e);
        }
        tracing::info!(%symbol, "Removed ticker from watchlist");
        Ok(true)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s.eq_ignore_ascii_case(symbol))
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Favourites in display form: uppercase, first occurrence wins.
    pub fn favorite_options(&self) -> Vec<String> {
        let mut options: Vec<String> = Vec::with_capacity(self.symbols.len());
        for symbol in self.symbols.iter().map(|s| s.to_uppercase()) {
            if !options.contains(&symbol) {
                options.push(symbol);
            }
        }
        options
    }

    /// The selector contents of the single-ticker dashboard: the default ticker,
    /// then every favourite.
    pub fn ticker_options(&self, default_ticker: &str) -> Vec<String> {
        let default_ticker = default_ticker.to_uppercase();
        let mut options = vec![default_ticker.clone()];
        options.extend(
            self.favorite_options()
                .into_iter()
                .filter(|s| *s != default_ticker),
        );
        options
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
