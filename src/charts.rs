use serde::{Deserialize, Serialize};

/// Lookback window used when a request does not name one.
pub const DEFAULT_INTERVAL_HOURS: i64 = 24;

/// Prefix and lookback shared by every chart query.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartWindow {
    pub url: String,
    #[serde(default = "default_interval")]
    pub interval: i64,
}

fn default_interval() -> i64 {
    DEFAULT_INTERVAL_HOURS
}

#[cfg(test)]
impl ChartWindow {
    pub fn new(url: impl Into<String>, interval: i64) -> Self {
        Self {
            url: url.into(),
            interval,
        }
    }
}

/// One point of an hourly time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimestampValue {
    pub bucket: String,
    pub value: f64,
}

/// Failed checks triaged by response time. The bands overlap:
/// `resolved` is `> 1s`, `warning` is `1s..=3s`, `critical` is `> 3s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct FailuresByTypes {
    pub critical: i64,
    pub warning: i64,
    pub resolved: i64,
}

/// Failure count for one (weekday, hour) cell. `day_of_week` is the ISO
/// weekday number, "1" for Monday through "7" for Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapEntry {
    pub day_of_week: String,
    pub hour_of_day: i64,
    pub value: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsOverview {
    pub failures: Vec<TimestampValue>,
    pub response_time: Vec<TimestampValue>,
    pub failures_by_types: Option<FailuresByTypes>,
    pub heatmap: Vec<HeatmapEntry>,
}
