// Client library root: watchlist persistence, request building and the fetch
// cycle against the moving-averages service.

pub mod config;
pub mod error;
pub mod query;
pub mod services;
pub mod storage;

pub use error::{ClientError, Result};
