// Drives one refresh cycle against the moving-averages service and keeps the
// resulting status for the dashboard to render.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use shared::models::MovingAveragesResponse;
use tokio::sync::RwLock;

use super::api::MovingAverageApi;
use crate::error::{ClientError, Result};
use crate::query::MovingAverageQuery;

/// Lifecycle of the last refresh. Results only exist on `Success` and a message
/// only on `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus<T> {
    Idle,
    Loading,
    Success(Vec<T>),
    Error(String),
}

impl<T> Default for FetchStatus<T> {
    fn default() -> Self {
        FetchStatus::Idle
    }
}

impl<T> FetchStatus<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn results(&self) -> Option<&[T]> {
        match self {
            FetchStatus::Success(results) => Some(results),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FetchStatus::Idle => "idle",
            FetchStatus::Loading => "loading",
            FetchStatus::Success(_) => "success",
            FetchStatus::Error(_) => "error",
        }
    }
}

/// Each refresh is numbered; only the most recently started one may publish its
/// outcome, so a slow earlier response never replaces a newer one.
pub struct FetchController<A, T> {
    api: A,
    state: Arc<RwLock<FetchStatus<T>>>,
    latest: AtomicU64,
}

impl<A, T> FetchController<A, T>
where
    A: MovingAverageApi,
    T: DeserializeOwned + Clone + Send + Sync,
{
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(FetchStatus::Idle)),
            latest: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Shared handle on the status, for readers living outside the controller.
    pub fn state_handle(&self) -> Arc<RwLock<FetchStatus<T>>> {
        self.state.clone()
    }

    pub async fn status(&self) -> FetchStatus<T> {
        self.state.read().await.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading()
    }

    /// Runs one refresh and returns the status visible once it settles.
    pub async fn refresh(&self, query: &MovingAverageQuery) -> FetchStatus<T> {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        if query.has_no_tickers() {
            tracing::info!(seq, "Refusing to refresh an empty watchlist");
            self.publish(seq, FetchStatus::Error(ClientError::EmptyWatchlist.user_message()))
                .await;
            return self.status().await;
        }

        self.publish(seq, FetchStatus::Loading).await;
        tracing::debug!(seq, params = ?query.params(), "Refresh started");

        let outcome = match self.fetch(query).await {
            Ok(results) => {
                tracing::info!(seq, count = results.len(), "Refresh succeeded");
                FetchStatus::Success(results)
            }
            Err(e) => FetchStatus::Error(e.user_message()),
        };
        if !self.publish(seq, outcome).await {
            tracing::debug!(seq, "Dropping outcome of a superseded refresh");
        }
        self.status().await
    }

    async fn fetch(&self, query: &MovingAverageQuery) -> Result<Vec<T>> {
        let body = self.api.get_moving_averages(query).await?;
        let response: MovingAveragesResponse<T> = serde_json::from_str(&body)?;
        Ok(response.data)
    }

    async fn publish(&self, seq: u64, status: FetchStatus<T>) -> bool {
        let mut state = self.state.write().await;
        if self.latest.load(Ordering::SeqCst) != seq {
            return false;
        }
        *state = status;
        true
    }
}
