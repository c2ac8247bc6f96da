use sqlx::SqlitePool;
use tracing::debug;

use crate::argument_parsing::Args;
use crate::charts::{ChartWindow, FailuresByTypes, HeatmapEntry, TimestampValue};
use crate::clickhouse::{ClickHouseClient, window_params};
use crate::error::StoreError;
use crate::sqlite::connect_sqlite;
use crate::{clickhouse_queries, sqlite_queries};

/// Where the `checks` rows live. Every chart query exists once per backend.
#[derive(Clone, Debug)]
pub enum ChecksStore {
    ClickHouse(ClickHouseClient),
    Sqlite(SqlitePool),
}

impl ChecksStore {
    pub async fn from_args(args: &Args) -> Result<Self, StoreError> {
        match &args.clickhouse_url {
            Some(url) if !url.is_empty() => Ok(Self::ClickHouse(ClickHouseClient::new(
                url,
                &args.clickhouse_user,
                &args.clickhouse_password,
                &args.clickhouse_database,
            )?)),
            _ => Ok(Self::Sqlite(connect_sqlite(&args.sqlite).await?)),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Self::ClickHouse(_) => "clickhouse",
            Self::Sqlite(_) => "sqlite",
        }
    }

    /// Failed checks per hour, oldest bucket first. Empty hours are omitted.
    pub async fn get_failures(
        &self,
        window: &ChartWindow,
    ) -> Result<Vec<TimestampValue>, StoreError> {
        let rows = match self {
            Self::ClickHouse(c) => {
                c.query(clickhouse_queries::SELECT_FAILURES, &window_params(window))
                    .await?
            }
            Self::Sqlite(s) => {
                sqlx::query_as::<_, TimestampValue>(sqlite_queries::SELECT_FAILURES)
                    .bind(&window.url)
                    .bind(window.interval)
                    .fetch_all(s)
                    .await?
            }
        };
        debug!(url = %window.url, interval = window.interval, rows = rows.len(), "failures");
        Ok(rows)
    }

    /// Average response time per hour over all checks, rounded to 3 decimals.
    pub async fn get_response_time(
        &self,
        window: &ChartWindow,
    ) -> Result<Vec<TimestampValue>, StoreError> {
        let rows = match self {
            Self::ClickHouse(c) => {
                c.query(clickhouse_queries::SELECT_RESPONSE_TIME, &window_params(window))
                    .await?
            }
            Self::Sqlite(s) => {
                sqlx::query_as::<_, TimestampValue>(sqlite_queries::SELECT_RESPONSE_TIME)
                    .bind(&window.url)
                    .bind(window.interval)
                    .fetch_all(s)
                    .await?
            }
        };
        debug!(url = %window.url, interval = window.interval, rows = rows.len(), "response time");
        Ok(rows)
    }

    pub async fn calculate_failures_by_types(
        &self,
        window: &ChartWindow,
    ) -> Result<Option<FailuresByTypes>, StoreError> {
        let counts = match self {
            Self::ClickHouse(c) => c
                .query::<FailuresByTypes>(
                    clickhouse_queries::SELECT_FAILURES_BY_TYPES,
                    &window_params(window),
                )
                .await?
                .into_iter()
                .next(),
            Self::Sqlite(s) => {
                sqlx::query_as::<_, FailuresByTypes>(sqlite_queries::SELECT_FAILURES_BY_TYPES)
                    .bind(&window.url)
                    .bind(window.interval)
                    .fetch_optional(s)
                    .await?
            }
        };
        debug!(url = %window.url, interval = window.interval, ?counts, "failures by types");
        Ok(counts)
    }

    /// Failure counts for all 168 (weekday, hour) cells, Monday 00h first.
    pub async fn get_heatmap_entry(
        &self,
        window: &ChartWindow,
    ) -> Result<Vec<HeatmapEntry>, StoreError> {
        let rows = match self {
            Self::ClickHouse(c) => {
                c.query(clickhouse_queries::SELECT_HEATMAP, &window_params(window))
                    .await?
            }
            Self::Sqlite(s) => {
                sqlx::query_as::<_, HeatmapEntry>(sqlite_queries::SELECT_HEATMAP)
                    .bind(&window.url)
                    .bind(window.interval)
                    .fetch_all(s)
                    .await?
            }
        };
        debug!(url = %window.url, interval = window.interval, rows = rows.len(), "heatmap");
        Ok(rows)
    }
}
