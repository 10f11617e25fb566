pub mod key_value;
pub mod watchlist;

pub use key_value::{JsonFileStore, KeyValueStore, MemoryStore};
pub use watchlist::WatchlistStore;
