// Result views: the SMA list of the single-ticker dashboard and the per-ticker
// cards of the watchlist dashboard.
use chrono::{DateTime, Utc};
use client::services::FetchStatus;
use shared::models::{MovingAverageResult, SmaPoint, DEFAULT_PERIODS, MAX_SINGLE_ROWS};
use shared::utils::{format_optional_price, format_price};

pub const LOADING_TEXT: &str = "Loading…";

#[derive(Debug, Clone, PartialEq)]
pub struct SmaRow {
    pub date: String,
    pub value: String,
}

/// The first few points, in the order the service sent them.
pub fn sma_rows(points: &[SmaPoint]) -> Vec<SmaRow> {
    points
        .iter()
        .take(MAX_SINGLE_ROWS)
        .map(|point| SmaRow {
            date: point.date.clone(),
            value: format_price(point.sma),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRow {
    pub label: String,
    pub sma: String,
    pub ema: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickerCard {
    pub ticker: String,
    pub subtitle: String,
    pub rows: Vec<PeriodRow>,
    pub errors: Vec<String>,
}

/// One card per ticker; the period table is fixed whatever the service returned.
pub fn ticker_card(result: &MovingAverageResult, now: DateTime<Utc>) -> TickerCard {
    let rows = DEFAULT_PERIODS
        .iter()
        .map(|&period| PeriodRow {
            label: format!("{} days", period),
            sma: format_optional_price(result.sma_for(period)),
            ema: format_optional_price(result.ema_for(period)),
        })
        .collect();

    TickerCard {
        ticker: result.ticker.clone(),
        subtitle: format!(
            "{} · {} · {}",
            result.interval,
            result.series_type,
            generated_label(result, now)
        ),
        rows,
        errors: result.errors.clone(),
    }
}

fn generated_label(result: &MovingAverageResult, now: DateTime<Utc>) -> String {
    match result.generated_at_utc() {
        Some(generated) => {
            let minutes = (now - generated).num_minutes();
            if minutes < 1 {
                format!("{} (just now)", result.generated_at)
            } else {
                format!("{} ({} min ago)", result.generated_at, minutes)
            }
        }
        None => result.generated_at.clone(),
    }
}

/// How a record type is laid out once a refresh succeeded.
pub trait ResultView: Sized {
    fn render_results(results: &[Self], now: DateTime<Utc>) -> Vec<String>;
}

impl ResultView for SmaPoint {
    fn render_results(results: &[Self], _now: DateTime<Utc>) -> Vec<String> {
        let mut lines = vec!["Latest SMA values".to_string()];
        lines.extend(
            sma_rows(results)
                .into_iter()
                .map(|row| format!("  {}: {}", row.date, row.value)),
        );
        lines
    }
}

impl ResultView for MovingAverageResult {
    fn render_results(results: &[Self], now: DateTime<Utc>) -> Vec<String> {
        let mut lines = Vec::new();
        for card in results.iter().map(|result| ticker_card(result, now)) {
            lines.push(format!("{}  {}", card.ticker, card.subtitle));
            lines.push(format!("  {:<10} {:>12} {:>12}", "Period", "SMA", "EMA"));
            for row in &card.rows {
                lines.push(format!("  {:<10} {:>12} {:>12}", row.label, row.sma, row.ema));
            }
            for error in &card.errors {
                lines.push(format!("  ! {}", error));
            }
            lines.push(String::new());
        }
        lines
    }
}

pub fn render_status<T: ResultView>(status: &FetchStatus<T>, now: DateTime<Utc>) -> Vec<String> {
    match status {
        FetchStatus::Idle => vec!["Type 'refresh' to load moving averages.".to_string()],
        FetchStatus::Loading => vec![LOADING_TEXT.to_string()],
        FetchStatus::Error(message) => vec![format!("Error: {}", message)],
        FetchStatus::Success(results) => T::render_results(results, now),
    }
}
