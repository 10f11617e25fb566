use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Periods (in days) the backend computes for every ticker of a batch request.
pub const DEFAULT_PERIODS: [u32; 4] = [9, 21, 50, 200];

/// Ticker preselected by the single-ticker dashboard.
pub const DEFAULT_TICKER: &str = "AAPL";

/// Seed list for the watchlist dashboard when nothing usable is persisted.
pub const DEFAULT_WATCHLIST: [&str; 3] = ["AAPL", "MSFT", "TSLA"];

/// Storage key holding the JSON-encoded favourite tickers.
pub const FAVORITES_KEY: &str = "favoriteTickers";

/// The single-ticker view only lists this many of the most recent SMA points.
pub const MAX_SINGLE_ROWS: usize = 5;

/// Timestamp layout of `generated_at` as emitted by the backend.
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    pub const ALL: [Interval; 3] = [Interval::Daily, Interval::Weekly, Interval::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Interval::Daily),
            "weekly" => Ok(Interval::Weekly),
            "monthly" => Ok(Interval::Monthly),
            _ => Err(format!(
                "Invalid interval: '{}'. Valid values: daily, weekly, monthly",
                s
            )),
        }
    }
}

/// Price field the indicator is computed over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    #[default]
    Close,
    Open,
    High,
    Low,
}

impl SeriesType {
    pub const ALL: [SeriesType; 4] = [
        SeriesType::Close,
        SeriesType::Open,
        SeriesType::High,
        SeriesType::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesType::Close => "close",
            SeriesType::Open => "open",
            SeriesType::High => "high",
            SeriesType::Low => "low",
        }
    }
}

impl fmt::Display for SeriesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeriesType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "close" => Ok(SeriesType::Close),
            "open" => Ok(SeriesType::Open),
            "high" => Ok(SeriesType::High),
            "low" => Ok(SeriesType::Low),
            _ => Err(format!(
                "Invalid series type: '{}'. Valid values: close, open, high, low",
                s
            )),
        }
    }
}

/// Indicator settings edited by the user. Lives only for the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryConfig {
    pub interval: Interval,
    pub series_type: SeriesType,
    /// Only sent by the single-ticker dashboard.
    pub time_period: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            interval: Interval::Daily,
            series_type: SeriesType::Close,
            time_period: 50,
        }
    }
}

/// One row of the single-ticker SMA series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmaPoint {
    pub date: String,
    pub sma: f64,
}

/// Per-ticker card of a batch request.
///
/// `interval` and `series_type` are kept as the strings the backend echoed back,
/// so an unexpected value does not reject the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageResult {
    pub ticker: String,
    #[serde(default)]
    pub interval: String,
    #[serde(default)]
    pub series_type: String,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub sma: BTreeMap<u32, Option<f64>>,
    #[serde(default)]
    pub ema: BTreeMap<u32, Option<f64>>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl MovingAverageResult {
    pub fn sma_for(&self, period: u32) -> Option<f64> {
        self.sma.get(&period).copied().flatten()
    }

    pub fn ema_for(&self, period: u32) -> Option<f64> {
        self.ema.get(&period).copied().flatten()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Parses `generated_at`; `None` when the backend used another layout.
    pub fn generated_at_utc(&self) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(self.generated_at.trim(), GENERATED_AT_FORMAT)
            .ok()
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
    }
}

/// Parameters the backend says it used for a batch request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEcho {
    #[serde(default)]
    pub tickers: Vec<String>,
    #[serde(default)]
    pub interval: String,
    #[serde(default)]
    pub series_type: String,
    #[serde(default)]
    pub periods: Vec<u32>,
}

/// Envelope of every `/api/moving-averages` response. A missing or `null`
/// `data` reads as an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct MovingAveragesResponse<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
    #[serde(default)]
    pub requested: Option<RequestEcho>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
