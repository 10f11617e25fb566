// Dashboard loop: reads commands, updates the state and prints the views.
// Refreshes run as background tasks so input keeps being handled meanwhile.
use std::sync::Arc;

use chrono::Utc;
use client::query::MovingAverageQuery;
use client::services::{FetchController, MovingAverageApi};
use client::storage::KeyValueStore;
use shared::models::{MovingAverageResult, SmaPoint};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;

use crate::components::command_palette::{Command, CommandPalette};
use crate::components::results::{render_status, LOADING_TEXT};
use crate::components::toolbar::{toolbar_lines, watchlist_summary};
use crate::config::{DashboardSettings, DashboardVariant};
use crate::state::app_state::AppState;

pub const REFRESH_IN_PROGRESS: &str = "A refresh is already in progress.";

/// Fetch controller of the active variant, each with its own record type.
pub enum ActiveController<A: MovingAverageApi> {
    Single(Arc<FetchController<A, SmaPoint>>),
    Watchlist(Arc<FetchController<A, MovingAverageResult>>),
}

impl<A: MovingAverageApi + 'static> ActiveController<A> {
    fn new(variant: DashboardVariant, api: A) -> Self {
        match variant {
            DashboardVariant::SingleTicker => ActiveController::Single(Arc::new(FetchController::new(api))),
            DashboardVariant::Watchlist => ActiveController::Watchlist(Arc::new(FetchController::new(api))),
        }
    }

    async fn is_loading(&self) -> bool {
        match self {
            ActiveController::Single(controller) => controller.is_loading().await,
            ActiveController::Watchlist(controller) => controller.is_loading().await,
        }
    }

    /// Starts a refresh on the runtime; the handle yields the rendered outcome.
    fn spawn_refresh(&self, query: MovingAverageQuery) -> JoinHandle<Vec<String>> {
        match self {
            ActiveController::Single(controller) => {
                let controller = Arc::clone(controller);
                tokio::spawn(async move { render_status(&controller.refresh(&query).await, Utc::now()) })
            }
            ActiveController::Watchlist(controller) => {
                let controller = Arc::clone(controller);
                tokio::spawn(async move { render_status(&controller.refresh(&query).await, Utc::now()) })
            }
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue(Vec<String>),
    Exit,
}

pub struct App<A: MovingAverageApi, S: KeyValueStore> {
    state: AppState<S>,
    controller: ActiveController<A>,
    palette: CommandPalette,
    refresh_on_start: bool,
    /// Latest refresh whose outcome has not been shown yet. Replacing it detaches
    /// the older task, whose outcome the controller then drops as stale.
    pending: Option<JoinHandle<Vec<String>>>,
}

impl<A: MovingAverageApi + 'static, S: KeyValueStore> App<A, S> {
    pub fn new(settings: &DashboardSettings, api: A, store: S) -> Self {
        Self {
            state: AppState::new(settings, store),
            controller: ActiveController::new(settings.variant, api),
            palette: CommandPalette::new(),
            refresh_on_start: settings.refresh_on_start,
            pending: None,
        }
    }

    pub fn state(&self) -> &AppState<S> {
        &self.state
    }

    pub async fn handle(&mut self, command: Command) -> Flow {
        let lines = match command {
            Command::SetTicker(symbol) => {
                self.state.set_ticker(&symbol);
                toolbar_lines(&self.state)
            }
            Command::AddFavorite(symbol) => match self.state.add_favorite(symbol.as_deref()) {
                Ok(true) => toolbar_lines(&self.state),
                Ok(false) => vec!["Already in favorites (or empty).".to_string()],
                Err(e) => vec![format!("Error: {}", e.user_message())],
            },
            Command::RemoveFavorite(symbol) => match self.state.remove_favorite(&symbol) {
                Ok(true) => toolbar_lines(&self.state),
                Ok(false) => vec![format!("{} is not in favorites.", symbol)],
                Err(e) => vec![format!("Error: {}", e.user_message())],
            },
            Command::SetInterval(interval) => {
                self.state.set_interval(interval);
                toolbar_lines(&self.state)
            }
            Command::SetSeriesType(series_type) => {
                self.state.set_series_type(series_type);
                toolbar_lines(&self.state)
            }
            Command::SetTimePeriod(period) => {
                self.state.set_time_period(period);
                let mut lines = toolbar_lines(&self.state);
                if self.state.variant == DashboardVariant::Watchlist {
                    lines.push("The watchlist always shows the 9, 21, 50 and 200 day periods.".to_string());
                }
                lines
            }
            Command::Refresh => self.start_refresh().await,
            Command::ShowWatchlist => vec![watchlist_summary(&self.state)],
            Command::Help => self.palette.help_lines(),
            Command::Exit => return Flow::Exit,
        };
        Flow::Continue(lines)
    }

    fn refresh_in_flight(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Starts a refresh and answers with the loading view. The watchlist refuses
    /// to start one while another is in flight.
    pub async fn start_refresh(&mut self) -> Vec<String> {
        if self.state.variant == DashboardVariant::Watchlist
            && (self.refresh_in_flight() || self.controller.is_loading().await)
        {
            return vec![REFRESH_IN_PROGRESS.to_string()];
        }
        let query = self.state.current_query();
        self.pending = Some(self.controller.spawn_refresh(query));
        vec![LOADING_TEXT.to_string()]
    }

    /// Waits for the refresh in flight, if any, and returns its rendered outcome.
    pub async fn settle_refresh(&mut self) -> Option<Vec<String>> {
        let handle = self.pending.take()?;
        Some(outcome_lines(handle.await))
    }

    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut header = vec!["Moving Averages".to_string()];
        header.extend(toolbar_lines(&self.state));
        write_lines(&mut output, &header).await?;

        if self.refresh_on_start {
            let lines = self.start_refresh().await;
            write_lines(&mut output, &lines).await?;
        }

        let mut input = input.lines();
        prompt(&mut output).await?;
        loop {
            tokio::select! {
                line = input.next_line() => {
                    let Some(line) = line? else { break };
                    if line.trim().is_empty() {
                        prompt(&mut output).await?;
                        continue;
                    }
                    match self.palette.parse(&line) {
                        Ok(command) => match self.handle(command).await {
                            Flow::Continue(lines) => write_lines(&mut output, &lines).await?,
                            Flow::Exit => {
                                if let Some(handle) = self.pending.take() {
                                    handle.abort();
                                }
                                tracing::info!("Leaving dashboard");
                                return Ok(());
                            }
                        },
                        Err(message) => write_lines(&mut output, &[message]).await?,
                    }
                    prompt(&mut output).await?;
                }
                lines = next_outcome(&mut self.pending) => {
                    write_lines(&mut output, &lines).await?;
                    prompt(&mut output).await?;
                }
            }
        }

        tracing::info!("Input closed, leaving dashboard");
        if let Some(lines) = self.settle_refresh().await {
            write_lines(&mut output, &lines).await?;
        }
        Ok(())
    }
}

/// Resolves once the pending refresh settles and clears it. Never resolves when
/// nothing is pending. Dropping this future leaves the refresh pending.
async fn next_outcome(pending: &mut Option<JoinHandle<Vec<String>>>) -> Vec<String> {
    let Some(handle) = pending.as_mut() else {
        return std::future::pending().await;
    };
    let joined = handle.await;
    *pending = None;
    outcome_lines(joined)
}

fn outcome_lines(joined: Result<Vec<String>, tokio::task::JoinError>) -> Vec<String> {
    joined.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Refresh task failed");
        vec![format!("Error: {}", e)]
    })
}

async fn write_lines<W: AsyncWrite + Unpin>(output: &mut W, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await
}

async fn prompt<W: AsyncWrite + Unpin>(output: &mut W) -> std::io::Result<()> {
    output.write_all(b"> ").await?;
    output.flush().await
}
